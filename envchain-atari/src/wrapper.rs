//! Environment wrappers.
mod channel_first;
mod clip_reward;
mod episodic_life;
mod fire_reset;
mod frame_stack;
mod keep_original;
mod max_and_skip;
mod noop_reset;
mod warp_frame;
pub use channel_first::ChannelFirst;
pub use clip_reward::ClipReward;
pub use episodic_life::EpisodicLife;
pub use fire_reset::FireReset;
pub use frame_stack::{FrameStack, FrameStackConfig};
pub use keep_original::KeepOriginalObservation;
pub use max_and_skip::{MaxAndSkip, MaxAndSkipConfig};
pub use noop_reset::{NoopReset, NoopResetConfig};
pub use warp_frame::{WarpFrame, WarpFrameConfig};
