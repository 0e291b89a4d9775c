//! Error types for remote task operations.

use thiserror::Error;

/// Fixed user-facing message reported when a remote call exceeds its deadline.
pub const CONNECTIVITY_MESSAGE: &str = "Please check your internet connection";

/// Uniform failure type for every repository operation.
///
/// The repository never lets a store failure escape as anything else; the
/// reducer always inspects a [`TaskResult`] and never installs per-call
/// error handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The remote call did not complete within the deadline
    #[error("{}", CONNECTIVITY_MESSAGE)]
    Timeout,

    /// The store client failed; carries the client's own message, which may
    /// be empty
    #[error("{0}")]
    Remote(String),
}

/// Result alias returned by every repository operation.
pub type TaskResult<T> = Result<T, TaskError>;
