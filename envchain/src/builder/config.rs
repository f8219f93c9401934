//! Configuration of a preprocessing pipeline.
use super::EnvWrapper;
use anyhow::Result;
use envchain_atari::{FrameStackConfig, MaxAndSkipConfig, NoopResetConfig, WarpFrameConfig};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`EnvBuilder::build()`](super::EnvBuilder::build).
///
/// Fields missing in a YAML file take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Id of the base environment in the registry.
    pub env_id: String,

    /// Wrapper tags, applied in order.
    pub wrappers: Vec<EnvWrapper>,

    /// Seed of the base environment and of the no-op sampler.
    pub seed: i64,

    /// Configuration of the `noop-reset` stage.
    pub noop_reset: NoopResetConfig,

    /// Configuration of the `max-and-skip` stage.
    pub max_and_skip: MaxAndSkipConfig,

    /// Configuration of the `warp-frame` stage.
    pub warp_frame: WarpFrameConfig,

    /// Configuration of the `frame-stack` stage.
    pub frame_stack: FrameStackConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            env_id: "PongNoFrameskip-v4".to_string(),
            wrappers: vec![],
            seed: 42,
            noop_reset: NoopResetConfig::default(),
            max_and_skip: MaxAndSkipConfig::default(),
            warp_frame: WarpFrameConfig::default(),
            frame_stack: FrameStackConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Sets the id of the base environment.
    pub fn env_id(mut self, v: impl Into<String>) -> Self {
        self.env_id = v.into();
        self
    }

    /// Sets the wrapper tags.
    pub fn wrappers(mut self, v: Vec<EnvWrapper>) -> Self {
        self.wrappers = v;
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, v: i64) -> Self {
        self.seed = v;
        self
    }

    /// Sets the configuration of the `noop-reset` stage.
    pub fn noop_reset(mut self, v: NoopResetConfig) -> Self {
        self.noop_reset = v;
        self
    }

    /// Sets the configuration of the `max-and-skip` stage.
    pub fn max_and_skip(mut self, v: MaxAndSkipConfig) -> Self {
        self.max_and_skip = v;
        self
    }

    /// Sets the configuration of the `warp-frame` stage.
    pub fn warp_frame(mut self, v: WarpFrameConfig) -> Self {
        self.warp_frame = v;
        self
    }

    /// Sets the configuration of the `frame-stack` stage.
    pub fn frame_stack(mut self, v: FrameStackConfig) -> Self {
        self.frame_stack = v;
        self
    }

    /// Constructs [`PipelineConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`PipelineConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
