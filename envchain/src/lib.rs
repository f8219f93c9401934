#![warn(missing_docs)]
//! Pipeline builder of envchain.
//!
//! Preprocessing chains are described by a list of [`EnvWrapper`] tags. A tag
//! is either a primitive wrapper or a bundle which expands to several of them,
//! e.g. `atari` expands to `noop-reset` followed by `max-and-skip`.
//! [`EnvBuilder`] creates a base environment from an [`EnvRegistry`] and wraps
//! it stage by stage.
//!
//! ```rust
//! use anyhow::Result;
//! use envchain::{parse_wrappers, BoxedEnv, EnvBuilder, EnvRegistry};
//! use envchain_atari::util::test::ScriptedEnv;
//! use envchain_core::Env;
//!
//! fn main() -> Result<()> {
//!     let registry = EnvRegistry::new().with("Scripted-v0", |_seed| {
//!         Ok(Box::new(ScriptedEnv::new([210, 160, 3])) as BoxedEnv)
//!     });
//!     let wrappers = parse_wrappers(&["atari", "deep-mind", "pytorch"])?;
//!     let mut env = EnvBuilder::new(&registry).make_environment_with_wrappers(
//!         "Scripted-v0",
//!         &wrappers,
//!         42,
//!     )?;
//!
//!     assert_eq!(env.observation_space().shape, [4, 84, 84]);
//!     assert_eq!(env.reset()?.shape(), [4, 84, 84]);
//!     Ok(())
//! }
//! ```
mod builder;
mod environment;
pub mod media;
pub mod notify;
mod registry;
pub use builder::{parse_wrappers, wrap, EnvBuilder, EnvWrapper, PipelineConfig, Stage};
pub use environment::Environment;
pub use registry::EnvRegistry;

/// A wrapper chain behind dynamic dispatch.
///
/// Chains are `Send` so that independent instances can run on worker threads.
pub type BoxedEnv = Box<dyn envchain_core::Env + Send>;
