//! Stacking of the last frames.
use anyhow::Result;
use envchain_core::{
    error::EnvChainError, ActionSpace, DiscreteAct, Env, LazyFrames, Obs, ObsSpace, Step,
};
use ndarray::Array3;
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, sync::Arc};

/// Configuration of [`FrameStack`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameStackConfig {
    /// The number of stacked frames.
    pub n_stack: usize,
}

impl Default for FrameStackConfig {
    fn default() -> Self {
        Self { n_stack: 4 }
    }
}

impl FrameStackConfig {
    /// Sets the number of stacked frames.
    pub fn n_stack(mut self, v: usize) -> Self {
        self.n_stack = v;
        self
    }
}

/// Stacks the last `n_stack` frames along the channel axis.
///
/// Observations are returned as [`LazyFrames`], which share frames between
/// consecutive observations and concatenate them only when the data is used.
/// This matters when observations are kept in a large replay buffer.
pub struct FrameStack<E: Env> {
    env: E,
    n_stack: usize,
    frames: VecDeque<Arc<Array3<u8>>>,
}

impl<E: Env> FrameStack<E> {
    /// Wraps an environment.
    pub fn build(env: E, config: &FrameStackConfig) -> Result<Self> {
        if config.n_stack == 0 {
            return Err(EnvChainError::InvalidParameter {
                wrapper: "FrameStack",
                name: "n_stack",
                value: "0".to_string(),
            }
            .into());
        }

        Ok(Self {
            env,
            n_stack: config.n_stack,
            frames: VecDeque::with_capacity(config.n_stack),
        })
    }

    fn check_shape(&self, obs: &Obs) -> Result<()> {
        let expected = self.env.observation_space().shape;
        if obs.shape() != expected {
            return Err(EnvChainError::ShapeMismatch {
                wrapper: "FrameStack",
                expected: format!("{:?}", expected),
                found: obs.shape().to_vec(),
            }
            .into());
        }
        Ok(())
    }

    fn get_ob(&self) -> Result<Obs> {
        debug_assert_eq!(self.frames.len(), self.n_stack);
        let frames = LazyFrames::new(self.frames.iter().cloned().collect())?;
        Ok(Obs::Stack(frames))
    }
}

impl<E: Env> Env for FrameStack<E> {
    fn name(&self) -> &str {
        "FrameStack"
    }

    fn observation_space(&self) -> ObsSpace {
        let space = self.env.observation_space();
        let [h, w, c] = space.shape;
        space.with_shape([h, w, c * self.n_stack])
    }

    fn action_space(&self) -> ActionSpace {
        self.env.action_space()
    }

    fn reset(&mut self) -> Result<Obs> {
        let obs = self.env.reset()?;
        self.check_shape(&obs)?;
        let frame = obs.into_shared();

        self.frames.clear();
        for _ in 0..self.n_stack {
            self.frames.push_back(frame.clone());
        }
        self.get_ob()
    }

    fn step(&mut self, act: &DiscreteAct) -> Result<Step> {
        let step = self.env.step(act)?;
        self.check_shape(&step.obs)?;

        // `step()` before the first `reset()` fills the stack as a reset would.
        let frame = step.obs.into_shared();
        if self.frames.is_empty() {
            self.frames.extend(std::iter::repeat(frame.clone()).take(self.n_stack - 1));
        }
        if self.frames.len() == self.n_stack {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);

        Ok(Step {
            obs: self.get_ob()?,
            reward: step.reward,
            is_terminated: step.is_terminated,
            info: step.info,
        })
    }

    fn inner(&self) -> Option<&dyn Env> {
        Some(&self.env)
    }
}
