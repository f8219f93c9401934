//! Keeps the observation before later wrappers distort it.
use anyhow::Result;
use envchain_core::{ActionSpace, DiscreteAct, Env, Obs, ObsSpace, Step};

/// Passes observations through unchanged and keeps the most recent one.
///
/// The kept observation is available through [`Env::original_observation()`]
/// of any wrapper placed above this one, e.g. for rendering what a human would
/// see while the agent sees grayscaled, downsampled frames.
pub struct KeepOriginalObservation<E: Env> {
    env: E,
    original_observation: Option<Obs>,
}

impl<E: Env> KeepOriginalObservation<E> {
    /// Wraps an environment.
    pub fn new(env: E) -> Self {
        Self {
            env,
            original_observation: None,
        }
    }
}

impl<E: Env> Env for KeepOriginalObservation<E> {
    fn name(&self) -> &str {
        "KeepOriginalObservation"
    }

    fn observation_space(&self) -> ObsSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> ActionSpace {
        self.env.action_space()
    }

    fn reset(&mut self) -> Result<Obs> {
        let obs = self.env.reset()?;
        self.original_observation = Some(obs.clone());
        Ok(obs)
    }

    fn step(&mut self, act: &DiscreteAct) -> Result<Step> {
        let step = self.env.step(act)?;
        self.original_observation = Some(step.obs.clone());
        Ok(step)
    }

    fn inner(&self) -> Option<&dyn Env> {
        Some(&self.env)
    }

    fn original_observation(&self) -> Option<&Obs> {
        self.original_observation.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::KeepOriginalObservation;
    use crate::{
        util::test::{ScriptedEnv, ScriptedStep},
        WarpFrame, WarpFrameConfig,
    };
    use anyhow::Result;
    use envchain_core::{DiscreteAct, Env, Obs};
    use std::sync::Arc;

    #[test]
    fn test_original_observation_survives_warp() -> Result<()> {
        let env = ScriptedEnv::new([210, 160, 3])
            .reset_fill(5)
            .script(vec![ScriptedStep::fill(9).with_lives(2)]);
        let env = KeepOriginalObservation::new(env);
        let mut env = WarpFrame::build(env, &WarpFrameConfig::default())?;

        assert!(env.original_observation().is_none());

        let obs = env.reset()?;
        assert_eq!(obs.shape(), [84, 84, 1]);
        let original = env.original_observation().map(|o| o.shape());
        assert_eq!(original, Some([210, 160, 3]));

        let step = env.step(&DiscreteAct::new(3))?;
        assert_eq!(step.obs.shape(), [84, 84, 1]);
        let original = env.original_observation().map(|o| o.as_array()[[0, 0, 0]]);
        assert_eq!(original, Some(9));

        // Other introspection still reaches the base environment.
        assert_eq!(env.lives(), 2);
        Ok(())
    }

    #[test]
    fn test_observation_is_shared_with_the_consumer() -> Result<()> {
        let mut env = KeepOriginalObservation::new(ScriptedEnv::new([2, 2, 1]));
        let step = env.step(&DiscreteAct::NOOP)?;

        match (&step.obs, env.original_observation()) {
            (Obs::Frame(a), Some(Obs::Frame(b))) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("expected frames"),
        }
        assert_eq!(step.reward, 0.0);
        assert!(!step.is_terminated);
        Ok(())
    }
}
