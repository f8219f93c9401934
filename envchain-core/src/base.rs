//! Core functionalities.
mod act;
mod env;
mod obs;
mod step;
pub use act::{ActionMeaning, ActionSpace, DiscreteAct};
pub use env::Env;
pub use obs::{Obs, ObsSpace};
pub use step::{Info, Step};
