//! Error types for the matrix inspector engine

use std::collections::TryReserveError;
use thiserror::Error;

/// Result type alias using the engine's [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by matrix operations
///
/// Errors are raised at the point of detection and propagate to the caller;
/// no operation retries or silently recovers.
#[derive(Error, Debug)]
pub enum Error {
    /// A cached property was queried before it was computed
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    /// The caller broke an operation's contract
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    /// The operation is not available for this storage format
    #[error("Operation '{op}' is not supported for {format} matrices")]
    UnsupportedOperation {
        /// The operation name
        op: &'static str,
        /// The storage format that rejected it
        format: &'static str,
    },

    /// A large buffer could not be reserved
    #[error("Failed to allocate {requested} elements")]
    Allocation {
        /// Number of elements requested
        requested: usize,
        /// Underlying reservation failure
        #[source]
        source: TryReserveError,
    },
}

impl Error {
    /// Shorthand for building a [`Error::PreconditionViolation`]
    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        Error::PreconditionViolation(msg.into())
    }
}

/// Fail with a [`Error::PreconditionViolation`] unless the lengths agree
pub(crate) fn check_len(what: &str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(Error::precondition(format!(
            "{} has length {} but {} was expected",
            what, got, expected
        )));
    }
    Ok(())
}
