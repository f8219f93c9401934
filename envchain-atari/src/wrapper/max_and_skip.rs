//! Action repeat with max-pooling over the last two frames.
use anyhow::Result;
use envchain_core::{error::EnvChainError, ActionSpace, DiscreteAct, Env, Obs, ObsSpace, Step};
use ndarray::{Array3, Zip};
use serde::{Deserialize, Serialize};

/// Configuration of [`MaxAndSkip`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaxAndSkipConfig {
    /// The number of underlying steps per step.
    pub skip: usize,
}

impl Default for MaxAndSkipConfig {
    fn default() -> Self {
        Self { skip: 4 }
    }
}

impl MaxAndSkipConfig {
    /// Sets the number of underlying steps per step.
    pub fn skip(mut self, v: usize) -> Self {
        self.skip = v;
        self
    }
}

/// Returns only every `skip`-th frame.
///
/// The action is repeated `skip` times and the rewards are summed. The returned
/// frame is the element-wise maximum of the last two frames, which removes the
/// flicker of sprites drawn on alternating frames. If the episode ends earlier,
/// the frame is built from whatever was buffered last.
pub struct MaxAndSkip<E: Env> {
    env: E,
    skip: usize,

    // The last two raw frames of the current cycle.
    obs_buffer: [Array3<u8>; 2],
}

impl<E: Env> MaxAndSkip<E> {
    /// Wraps an environment.
    pub fn build(env: E, config: &MaxAndSkipConfig) -> Result<Self> {
        if config.skip == 0 {
            return Err(EnvChainError::InvalidParameter {
                wrapper: "MaxAndSkip",
                name: "skip",
                value: "0".to_string(),
            }
            .into());
        }
        let [h, w, c] = env.observation_space().shape;

        Ok(Self {
            env,
            skip: config.skip,
            obs_buffer: [Array3::zeros((h, w, c)), Array3::zeros((h, w, c))],
        })
    }

    fn buffer(&mut self, slot: usize, obs: &Obs) -> Result<()> {
        if obs.shape() != self.env.observation_space().shape {
            return Err(EnvChainError::ShapeMismatch {
                wrapper: "MaxAndSkip",
                expected: format!("{:?}", self.env.observation_space().shape),
                found: obs.shape().to_vec(),
            }
            .into());
        }
        self.obs_buffer[slot].assign(obs.as_array());
        Ok(())
    }
}

impl<E: Env> Env for MaxAndSkip<E> {
    fn name(&self) -> &str {
        "MaxAndSkip"
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
        let mut total_reward = 0f32;
        let mut last = None;

        for i in 0..self.skip {
            let step = self.env.step(act)?;
            if i + 2 == self.skip {
                self.buffer(0, &step.obs)?;
            } else if i + 1 == self.skip {
                self.buffer(1, &step.obs)?;
            }
            total_reward += step.reward;
            let done = step.is_terminated;
            last = Some(step);
            if done {
                break;
            }
        }

        // `skip >= 1`, so at least one step has been taken.
        let last = last.ok_or_else(|| anyhow::anyhow!("MaxAndSkip took no step"))?;
        let max_frame = Zip::from(&self.obs_buffer[0])
            .and(&self.obs_buffer[1])
            .map_collect(|&a, &b| a.max(b));

        Ok(Step::new(
            Obs::frame(max_frame),
            total_reward,
            last.is_terminated,
            last.info,
        ))
    }

    fn inner(&self) -> Option<&dyn Env> {
        Some(&self.env)
    }
}

#[cfg(test)]
mod tests {
    use super::{MaxAndSkip, MaxAndSkipConfig};
    use crate::util::test::{ScriptedEnv, ScriptedStep};
    use anyhow::Result;
    use envchain_core::{error::EnvChainError, DiscreteAct, Env};
    use ndarray::Array3;

    #[test]
    fn test_rewards_are_summed() -> Result<()> {
        let base = ScriptedEnv::new([2, 2, 1]).script(vec![
            ScriptedStep::reward(1.0),
            ScriptedStep::reward(-2.5),
            ScriptedStep::reward(0.0),
            ScriptedStep::reward(4.0),
        ]);
        let log = base.log();
        let mut env = MaxAndSkip::build(base, &MaxAndSkipConfig::default())?;

        let step = env.step(&DiscreteAct::new(3))?;
        assert_eq!(step.reward, 2.5);
        assert!(!step.is_terminated);
        assert_eq!(log.lock().unwrap().actions, vec![3, 3, 3, 3]);

        // Information of the final underlying step.
        assert_eq!(step.info.get_scalar("step")?, 4.0);
        Ok(())
    }

    #[test]
    fn test_max_pooling_of_last_two_frames() -> Result<()> {
        let base = ScriptedEnv::new([3, 2, 3]).script(vec![
            ScriptedStep::fill(250),
            ScriptedStep::fill(1),
            ScriptedStep::fill(10),
            ScriptedStep::fill(20),
            // Second cycle: the larger frame comes first.
            ScriptedStep::fill(0),
            ScriptedStep::fill(0),
            ScriptedStep::fill(20),
            ScriptedStep::fill(10),
        ]);
        let mut env = MaxAndSkip::build(base, &MaxAndSkipConfig::default())?;

        let expected = Array3::from_elem((3, 2, 3), 20u8);
        assert_eq!(env.step(&DiscreteAct::NOOP)?.obs.as_array(), &expected);
        assert_eq!(env.step(&DiscreteAct::NOOP)?.obs.as_array(), &expected);
        Ok(())
    }

    #[test]
    fn test_terminal_stops_the_cycle_early() -> Result<()> {
        let base = ScriptedEnv::new([2, 2, 1]).script(vec![
            ScriptedStep::reward(1.0).with_fill(3),
            ScriptedStep::reward(1.0).with_fill(4).terminal(),
            ScriptedStep::reward(100.0),
        ]);
        let log = base.log();
        let mut env = MaxAndSkip::build(base, &MaxAndSkipConfig::default())?;

        let step = env.step(&DiscreteAct::NOOP)?;
        assert!(step.is_terminated);
        assert_eq!(step.reward, 2.0);
        assert_eq!(log.lock().unwrap().n_steps(), 2);
        // Nothing was buffered in this cycle.
        assert_eq!(step.obs.shape(), [2, 2, 1]);
        Ok(())
    }

    #[test]
    fn test_skip_of_one_passes_frames_through() -> Result<()> {
        let base = ScriptedEnv::new([2, 2, 1]).script(vec![ScriptedStep::fill(9)]);
        let mut env = MaxAndSkip::build(base, &MaxAndSkipConfig::default().skip(1))?;
        assert_eq!(env.step(&DiscreteAct::NOOP)?.obs.as_array()[[1, 1, 0]], 9);
        assert!(MaxAndSkip::build(ScriptedEnv::new([2, 2, 1]), &MaxAndSkipConfig::default().skip(0)).is_err());
        Ok(())
    }

    #[test]
    fn test_undeclared_frame_shape_is_rejected() {
        let base = ScriptedEnv::new([2, 2, 1]).emitting_shape([3, 3, 1]);
        let mut env = MaxAndSkip::build(base, &MaxAndSkipConfig::default()).unwrap();
        let err = env.step(&DiscreteAct::NOOP).err().expect("step must fail");
        assert!(matches!(
            err.downcast_ref::<EnvChainError>(),
            Some(EnvChainError::ShapeMismatch { .. })
        ));
    }
}
