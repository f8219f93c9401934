#![warn(missing_docs)]
//! Core traits and types of envchain.
//!
//! An environment exposes `reset()` and `step()` through the [`Env`] trait.
//! Preprocessing stages (frame skipping, grayscaling, frame stacking, ...) are
//! implemented as wrappers, each of which owns the environment beneath it and
//! implements [`Env`] again, so that a chain of wrappers looks like a single
//! environment to its consumer.
//!
//! ```rust
//! use anyhow::Result;
//! use envchain_core::{ActionMeaning, ActionSpace, DiscreteAct, Env, Obs, ObsSpace, Step, record::Record};
//! use ndarray::Array3;
//!
//! struct Blank;
//!
//! impl Env for Blank {
//!     fn name(&self) -> &str {
//!         "Blank"
//!     }
//!
//!     fn observation_space(&self) -> ObsSpace {
//!         ObsSpace::new([2, 2, 3])
//!     }
//!
//!     fn action_space(&self) -> ActionSpace {
//!         ActionSpace::new(vec![ActionMeaning::Noop, ActionMeaning::Fire])
//!     }
//!
//!     fn reset(&mut self) -> Result<Obs> {
//!         Ok(Obs::frame(Array3::zeros((2, 2, 3))))
//!     }
//!
//!     fn step(&mut self, _act: &DiscreteAct) -> Result<Step> {
//!         Ok(Step::new(self.reset()?, 0.0, false, Record::empty()))
//!     }
//! }
//!
//! let mut env = Blank;
//! assert_eq!(env.reset().unwrap().shape(), [2, 2, 3]);
//! ```
pub mod error;
pub mod record;

mod base;
pub use base::{ActionMeaning, ActionSpace, DiscreteAct, Env, Info, Obs, ObsSpace, Step};

mod lazy_frames;
pub use lazy_frames::LazyFrames;
