//! Error types for the status aggregator.

use thiserror::Error;

/// Result type for aggregator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Aggregator errors. Every error is scoped to a single invocation.
#[derive(Clone, Debug, Error)]
pub enum Error {
    /// The member source could not be listed.
    #[error("Member source error: {0}")]
    MemberSource(String),

    /// The status store could not be read or written.
    #[error("Status store error: {0}")]
    StatusStore(String),

    /// `start` was called on a service that is already running.
    #[error("Aggregator service already started")]
    AlreadyStarted,
}
