//! Environment step.
use super::Obs;
use crate::record::Record;

/// Auxiliary information of a step, passed through wrappers unchanged.
pub type Info = Record;

/// Observation, reward and termination flag emitted by [`Env::step()`].
///
/// [`Env::step()`]: crate::Env::step
#[derive(Debug, Clone)]
pub struct Step {
    /// Observation after the action.
    pub obs: Obs,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if the episode is terminated.
    pub is_terminated: bool,

    /// Information given by the innermost environment.
    pub info: Info,
}

impl Step {
    /// Constructs a [`Step`] object.
    pub fn new(obs: Obs, reward: f32, is_terminated: bool, info: Info) -> Self {
        Step {
            obs,
            reward,
            is_terminated,
            info,
        }
    }

    #[inline]
    /// Terminated.
    pub fn is_done(&self) -> bool {
        self.is_terminated
    }
}
