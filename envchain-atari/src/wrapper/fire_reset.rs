//! Fire action on reset.
use anyhow::Result;
use envchain_core::{
    error::EnvChainError, ActionMeaning, ActionSpace, DiscreteAct, Env, Obs, ObsSpace, Step,
};

/// Takes the fire action on reset, for environments that are fixed until firing.
///
/// After the wrapped reset, action 1 (FIRE) and then action 2 are taken. If
/// either of them ends the episode, the wrapped environment is reset again.
/// The last produced observation is returned.
pub struct FireReset<E: Env> {
    env: E,
}

impl<E: Env> FireReset<E> {
    /// Wraps an environment whose action 1 is FIRE and which has at least 3 actions.
    pub fn build(env: E) -> Result<Self> {
        let actions = env.action_space();
        let meaning = actions.meaning(1);
        if meaning != Some(ActionMeaning::Fire) {
            return Err(EnvChainError::MissingActionMeaning {
                wrapper: "FireReset",
                index: 1,
                expected: ActionMeaning::Fire.to_string(),
                found: meaning.map_or("-".to_string(), |m| m.to_string()),
            }
            .into());
        }
        if actions.n() < 3 {
            return Err(EnvChainError::TooFewActions {
                wrapper: "FireReset",
                required: 3,
                found: actions.n(),
            }
            .into());
        }

        Ok(Self { env })
    }

    fn step_or_reset(&mut self, act: u8) -> Result<Obs> {
        let step = self.env.step(&DiscreteAct::new(act))?;
        if step.is_terminated {
            self.env.reset()
        } else {
            Ok(step.obs)
        }
    }
}

impl<E: Env> Env for FireReset<E> {
    fn name(&self) -> &str {
        "FireReset"
    }

    fn observation_space(&self) -> ObsSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> ActionSpace {
        self.env.action_space()
    }

    fn reset(&mut self) -> Result<Obs> {
        self.env.reset()?;
        self.step_or_reset(1)?;
        self.step_or_reset(2)
    }

    fn step(&mut self, act: &DiscreteAct) -> Result<Step> {
        self.env.step(act)
    }

    fn inner(&self) -> Option<&dyn Env> {
        Some(&self.env)
    }
}
