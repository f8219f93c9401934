//! Random number of no-op actions on reset.
use anyhow::Result;
use envchain_core::{
    error::EnvChainError, ActionMeaning, ActionSpace, DiscreteAct, Env, Obs, ObsSpace, Step,
};
use log::trace;
use serde::{Deserialize, Serialize};

/// Configuration of [`NoopReset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoopResetConfig {
    /// Maximum number of no-op actions taken on reset.
    pub noop_max: usize,

    /// If given, always takes this number of no-op actions.
    pub override_num_noops: Option<usize>,
}

impl Default for NoopResetConfig {
    fn default() -> Self {
        Self {
            noop_max: 30,
            override_num_noops: None,
        }
    }
}

impl NoopResetConfig {
    /// Sets the maximum number of no-op actions.
    pub fn noop_max(mut self, v: usize) -> Self {
        self.noop_max = v;
        self
    }

    /// Fixes the number of no-op actions.
    pub fn override_num_noops(mut self, v: Option<usize>) -> Self {
        self.override_num_noops = v;
        self
    }
}

/// Samples initial states by taking a random number of no-op actions on reset.
///
/// The number is drawn uniformly from `1..=noop_max`. The no-op action must be
/// the action 0 of the wrapped environment.
pub struct NoopReset<E: Env> {
    env: E,
    noop_max: usize,
    override_num_noops: Option<usize>,
    rng: fastrand::Rng,
}

impl<E: Env> NoopReset<E> {
    /// Wraps an environment. `seed` initializes the sampler of the number of no-ops.
    pub fn build(env: E, config: &NoopResetConfig, seed: i64) -> Result<Self> {
        let meaning = env.action_space().meaning(0);
        if meaning != Some(ActionMeaning::Noop) {
            return Err(EnvChainError::MissingActionMeaning {
                wrapper: "NoopReset",
                index: 0,
                expected: ActionMeaning::Noop.to_string(),
                found: meaning.map_or("-".to_string(), |m| m.to_string()),
            }
            .into());
        }
        if config.noop_max == 0 {
            return Err(EnvChainError::InvalidParameter {
                wrapper: "NoopReset",
                name: "noop_max",
                value: "0".to_string(),
            }
            .into());
        }
        if config.override_num_noops == Some(0) {
            return Err(EnvChainError::InvalidParameter {
                wrapper: "NoopReset",
                name: "override_num_noops",
                value: "0".to_string(),
            }
            .into());
        }

        Ok(Self {
            env,
            noop_max: config.noop_max,
            override_num_noops: config.override_num_noops,
            rng: fastrand::Rng::with_seed(seed as u64),
        })
    }
}

impl<E: Env> Env for NoopReset<E> {
    fn name(&self) -> &str {
        "NoopReset"
    }

    fn observation_space(&self) -> ObsSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> ActionSpace {
        self.env.action_space()
    }

    fn reset(&mut self) -> Result<Obs> {
        let mut obs = self.env.reset()?;
        let noops = match self.override_num_noops {
            Some(n) => n,
            None => self.rng.usize(1..=self.noop_max),
        };
        trace!("NoopReset::reset(): {} no-ops", noops);

        for _ in 0..noops {
            let step = self.env.step(&DiscreteAct::NOOP)?;
            obs = if step.is_terminated {
                self.env.reset()?
            } else {
                step.obs
            };
        }

        Ok(obs)
    }

    fn step(&mut self, act: &DiscreteAct) -> Result<Step> {
        self.env.step(act)
    }

    fn inner(&self) -> Option<&dyn Env> {
        Some(&self.env)
    }
}
