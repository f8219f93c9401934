//! Makes end-of-life the end of an episode.
use anyhow::Result;
use envchain_core::{ActionSpace, DiscreteAct, Env, Obs, ObsSpace, Step};
use log::trace;

/// Reports the loss of a life as the end of an episode.
///
/// The wrapped environment is only reset when the game is over. On reset after
/// a life loss, a single no-op step advances the running episode
/// instead of restarting it, so all states remain reachable.
///
/// A life loss is only reported while lives remain. Some games report zero
/// lives for a few frames before the game is over; requiring a positive count
/// avoids a second pseudo-terminal there. This is a heuristic: it does not
/// bound how long such transients last.
pub struct EpisodicLife<E: Env> {
    env: E,
    lives: usize,
    was_real_done: bool,
}

impl<E: Env> EpisodicLife<E> {
    /// Wraps an environment.
    pub fn new(env: E) -> Self {
        Self {
            env,
            lives: 0,
            was_real_done: true,
        }
    }
}

impl<E: Env> Env for EpisodicLife<E> {
    fn name(&self) -> &str {
        "EpisodicLife"
    }

    fn observation_space(&self) -> ObsSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> ActionSpace {
        self.env.action_space()
    }

    fn reset(&mut self) -> Result<Obs> {
        let obs = if self.was_real_done {
            self.env.reset()?
        } else {
            // The game continues after a lost life.
            trace!("EpisodicLife::reset(): advance from a lost life");
            self.env.step(&DiscreteAct::NOOP)?.obs
        };
        self.lives = self.env.lives();
        Ok(obs)
    }

    fn step(&mut self, act: &DiscreteAct) -> Result<Step> {
        let mut step = self.env.step(act)?;
        self.was_real_done = step.is_terminated;

        // A gained life is not a loss.
        let lives = self.env.lives();
        if lives < self.lives && lives > 0 {
            step.is_terminated = true;
        }
        self.lives = lives;

        Ok(step)
    }

    fn inner(&self) -> Option<&dyn Env> {
        Some(&self.env)
    }
}
