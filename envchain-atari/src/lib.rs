//! Preprocessing wrappers for Atari-like environments.
//!
//! The wrappers follow the preprocessing of
//! [`atari_wrappers.py`](https://github.com/openai/baselines/blob/master/baselines/common/atari_wrappers.py).
//! Each one owns the environment it wraps and implements [`Env`] again, so they
//! compose in any order:
//!
//! ```rust
//! use anyhow::Result;
//! use envchain_atari::{
//!     util::test::{ScriptedEnv, ScriptedStep},
//!     ClipReward, FrameStack, FrameStackConfig, MaxAndSkip, MaxAndSkipConfig, WarpFrame,
//!     WarpFrameConfig,
//! };
//! use envchain_core::{DiscreteAct, Env};
//!
//! fn main() -> Result<()> {
//!     let env = ScriptedEnv::new([210, 160, 3]).script(vec![ScriptedStep::reward(3.0); 8]);
//!     let env = MaxAndSkip::build(env, &MaxAndSkipConfig::default())?;
//!     let env = WarpFrame::build(env, &WarpFrameConfig::default())?;
//!     let env = ClipReward::new(env);
//!     let mut env = FrameStack::build(env, &FrameStackConfig::default())?;
//!
//!     assert_eq!(env.reset()?.shape(), [84, 84, 4]);
//!     let step = env.step(&DiscreteAct::new(2))?;
//!     assert_eq!(step.reward, 1.0);
//!     Ok(())
//! }
//! ```
//!
//! [`Env`]: envchain_core::Env
mod wrapper;
pub mod util;
pub use wrapper::{
    ChannelFirst, ClipReward, EpisodicLife, FireReset, FrameStack, FrameStackConfig,
    KeepOriginalObservation, MaxAndSkip, MaxAndSkipConfig, NoopReset, NoopResetConfig, WarpFrame,
    WarpFrameConfig,
};
