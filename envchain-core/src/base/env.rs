//! Environment.
use super::{ActionSpace, DiscreteAct, Obs, ObsSpace, Step};
use anyhow::Result;

/// Represents an environment with reset/step semantics.
///
/// Base environments implement this trait directly. Wrappers implement it by
/// delegating to the environment they own and transforming inputs and outputs.
/// Introspection which only the innermost environment can answer, such as
/// [`Env::lives()`], is forwarded through [`Env::inner()`] by default.
pub trait Env {
    /// Name of the environment or the wrapper.
    fn name(&self) -> &str;

    /// Declared space of the observations returned by `reset()` and `step()`.
    fn observation_space(&self) -> ObsSpace;

    /// Discrete actions accepted by `step()`.
    fn action_space(&self) -> ActionSpace;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Obs>;

    /// Performs an environment step.
    fn step(&mut self, act: &DiscreteAct) -> Result<Step>;

    /// The environment wrapped by this one, `None` for base environments.
    fn inner(&self) -> Option<&dyn Env> {
        None
    }

    /// The number of remaining lives in the game.
    ///
    /// Base environments without the notion of lives report 0.
    fn lives(&self) -> usize {
        self.inner().map_or(0, |env| env.lives())
    }

    /// The most recent observation kept before any distorting preprocessing,
    /// if a tap has been placed in the chain.
    fn original_observation(&self) -> Option<&Obs> {
        self.inner().and_then(|env| env.original_observation())
    }

    /// Names of the environments in the chain, from the outermost one.
    fn chain(&self) -> Vec<String> {
        let mut names = vec![self.name().to_string()];
        let mut env = self.inner();
        while let Some(e) = env {
            names.push(e.name().to_string());
            env = e.inner();
        }
        names
    }
}

impl<E: Env + ?Sized> Env for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn observation_space(&self) -> ObsSpace {
        (**self).observation_space()
    }

    fn action_space(&self) -> ActionSpace {
        (**self).action_space()
    }

    fn reset(&mut self) -> Result<Obs> {
        (**self).reset()
    }

    fn step(&mut self, act: &DiscreteAct) -> Result<Step> {
        (**self).step(act)
    }

    fn inner(&self) -> Option<&dyn Env> {
        (**self).inner()
    }

    fn lives(&self) -> usize {
        (**self).lives()
    }

    fn original_observation(&self) -> Option<&Obs> {
        (**self).original_observation()
    }

    fn chain(&self) -> Vec<String> {
        (**self).chain()
    }
}
