//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
///
/// All variants except the record errors are configuration errors. They are
/// raised when a wrapper chain is constructed, or at the first call which
/// reveals that an environment does not behave as it declared.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvChainError {
    /// A wrapper tag which is not in the vocabulary.
    #[error("Unknown wrapper: {0}")]
    UnknownWrapper(String),

    /// An environment id which is not registered.
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    /// The action set does not bind the expected meaning to an index.
    #[error("{wrapper} requires action {index} to be {expected}, found {found}")]
    MissingActionMeaning {
        /// Name of the wrapper.
        wrapper: &'static str,
        /// Index of the action.
        index: usize,
        /// Required meaning.
        expected: String,
        /// Meaning found at the index, `-` if the index is out of range.
        found: String,
    },

    /// The action set is smaller than required.
    #[error("{wrapper} requires at least {required} actions, found {found}")]
    TooFewActions {
        /// Name of the wrapper.
        wrapper: &'static str,
        /// Minimum number of actions.
        required: usize,
        /// Number of actions of the environment.
        found: usize,
    },

    /// An observation does not have the expected shape.
    #[error("{wrapper} expects observations of shape {expected}, got {found:?}")]
    ShapeMismatch {
        /// Name of the wrapper.
        wrapper: &'static str,
        /// Description of the expected shape.
        expected: String,
        /// Actual shape.
        found: Vec<usize>,
    },

    /// A wrapper parameter is out of its domain.
    #[error("Invalid parameter of {wrapper}: {name} = {value}")]
    InvalidParameter {
        /// Name of the wrapper.
        wrapper: &'static str,
        /// Name of the parameter.
        name: &'static str,
        /// Given value.
        value: String,
    },

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
