//! Auxiliary information attached to environment steps.
//!
//! A [`Record`] is a string-keyed map of [`RecordValue`]s. Base environments put
//! whatever they want to report into it (e.g. the raw score, the frame number),
//! and wrappers pass it through unchanged.
//!
//! ```rust
//! use envchain_core::record::{Record, RecordValue};
//!
//! let mut record = Record::from_scalar("ale.lives", 3.0);
//! record.insert("game", RecordValue::String("pong".to_string()));
//! assert_eq!(record.get_scalar("ale.lives").unwrap(), 3.0);
//! ```
mod base;

pub use base::{Record, RecordValue};
