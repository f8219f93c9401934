//! Reward clipping.
use anyhow::Result;
use envchain_core::{ActionSpace, DiscreteAct, Env, Obs, ObsSpace, Step};

/// Bins rewards to `{+1, 0, -1}` by their sign.
pub struct ClipReward<E: Env> {
    env: E,
}

impl<E: Env> ClipReward<E> {
    /// Wraps an environment.
    pub fn new(env: E) -> Self {
        Self { env }
    }
}

/// Sign of `r` as a reward. Zero and NaN give 0.
pub(crate) fn sign(r: f32) -> f32 {
    if r > 0.0 {
        1.0
    } else if r < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl<E: Env> Env for ClipReward<E> {
    fn name(&self) -> &str {
        "ClipReward"
    }

    fn observation_space(&self) -> ObsSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> ActionSpace {
        self.env.action_space()
    }

    fn reset(&mut self) -> Result<Obs> {
        self.env.reset()
    }

    fn step(&mut self, act: &DiscreteAct) -> Result<Step> {
        let mut step = self.env.step(act)?;
        step.reward = sign(step.reward);
        Ok(step)
    }

    fn inner(&self) -> Option<&dyn Env> {
        Some(&self.env)
    }
}
