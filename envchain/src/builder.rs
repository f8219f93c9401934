//! Construction of wrapper chains.
mod config;
mod tag;
use crate::{BoxedEnv, EnvRegistry, Environment};
use anyhow::Result;
pub use config::PipelineConfig;
use envchain_atari::{
    ChannelFirst, ClipReward, EpisodicLife, FireReset, FrameStack, KeepOriginalObservation,
    MaxAndSkip, NoopReset, WarpFrame,
};
use envchain_core::{ActionMeaning, Env};
use log::{info, warn};
use std::str::FromStr;
pub use tag::{parse_wrappers, EnvWrapper, Stage};

/// Wraps `env` with the stages of `wrappers`, in order.
///
/// Parameters of the stages are taken from `config`; its `env_id` and
/// `wrappers` fields are not used. The `fire-reset` stage is skipped if FIRE is
/// not in the action set of the environment.
pub fn wrap(
    env: BoxedEnv,
    wrappers: &[EnvWrapper],
    config: &PipelineConfig,
) -> Result<BoxedEnv> {
    let mut env = env;
    for tag in wrappers {
        for stage in tag.stages() {
            env = apply(env, stage, config)?;
        }
    }
    Ok(env)
}

fn apply(env: BoxedEnv, stage: Stage, config: &PipelineConfig) -> Result<BoxedEnv> {
    let env: BoxedEnv = match stage {
        Stage::KeepOriginalObservation => Box::new(KeepOriginalObservation::new(env)),
        Stage::NoopReset => Box::new(NoopReset::build(env, &config.noop_reset, config.seed)?),
        Stage::MaxAndSkip => Box::new(MaxAndSkip::build(env, &config.max_and_skip)?),
        Stage::EpisodicLife => Box::new(EpisodicLife::new(env)),
        Stage::FireReset => {
            if !env.action_space().contains(ActionMeaning::Fire) {
                info!("Skip FireReset, no FIRE in the action set");
                return Ok(env);
            }
            Box::new(FireReset::build(env)?)
        }
        Stage::WarpFrame => Box::new(WarpFrame::build(env, &config.warp_frame)?),
        Stage::ClipReward => Box::new(ClipReward::new(env)),
        Stage::FrameStack => Box::new(FrameStack::build(env, &config.frame_stack)?),
        Stage::ChannelFirst => Box::new(ChannelFirst::new(env)),
    };
    info!(
        "Wrapped with {}, observation shape {:?}",
        env.name(),
        env.observation_space().shape
    );
    Ok(env)
}

/// Creates base environments from a registry and wraps them.
pub struct EnvBuilder<'a> {
    registry: &'a EnvRegistry,
}

impl<'a> EnvBuilder<'a> {
    /// Creates a builder over `registry`.
    pub fn new(registry: &'a EnvRegistry) -> Self {
        Self { registry }
    }

    /// Creates the base environment `id` without wrappers.
    pub fn make_environment(&self, id: &str, seed: i64) -> Result<BoxedEnv> {
        self.registry.make(id, seed)
    }

    /// Creates the base environment `id` wrapped with `wrappers`, using default
    /// parameters for every stage.
    pub fn make_environment_with_wrappers(
        &self,
        id: &str,
        wrappers: &[EnvWrapper],
        seed: i64,
    ) -> Result<BoxedEnv> {
        let config = PipelineConfig::default()
            .env_id(id)
            .wrappers(wrappers.to_vec())
            .seed(seed);
        self.build(&config)
    }

    /// Creates the environment described by `config`.
    pub fn build(&self, config: &PipelineConfig) -> Result<BoxedEnv> {
        info!(
            "Build {} with [{}]",
            config.env_id,
            config
                .wrappers
                .iter()
                .map(|tag| tag.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        if skips_twice(&config.env_id, &config.wrappers) {
            warn!(
                "{} skips frames by itself, max-and-skip skips them again",
                config.env_id
            );
        }
        let env = self.make_environment(&config.env_id, config.seed)?;
        wrap(env, &config.wrappers, config)
    }
}

/// Returns `true` if `wrappers` apply frame skipping to a well-known
/// environment which already skips frames.
fn skips_twice(id: &str, wrappers: &[EnvWrapper]) -> bool {
    let skips_frames = Environment::from_str(id).map_or(false, |env| env.skips_frames());
    skips_frames
        && wrappers
            .iter()
            .any(|tag| tag.stages().contains(&Stage::MaxAndSkip))
}

#[cfg(test)]
mod tests {
    use super::{skips_twice, EnvWrapper};

    #[test]
    fn test_frame_skipping_applied_twice() {
        let atari = [EnvWrapper::Atari, EnvWrapper::DeepMind];
        assert!(skips_twice("Breakout-v0", &atari));
        assert!(skips_twice("PongDeterministic-v4", &[EnvWrapper::MaxAndSkip]));
        assert!(!skips_twice("PongNoFrameskip-v4", &atari));
        assert!(!skips_twice("Breakout-v0", &[EnvWrapper::NoopReset, EnvWrapper::DeepMind]));
        // Ids outside the well-known set are not checked.
        assert!(!skips_twice("Scripted-v0", &atari));
    }
}
