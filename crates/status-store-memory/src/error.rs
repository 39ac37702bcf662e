//! Error types for the in-memory status store.

use fleet_status_store::{StatusStoreError, StatusStoreErrorKind};
use thiserror::Error;

/// Error type for the in-memory status store.
#[derive(Clone, Debug, Error)]
pub enum Error {
    /// Error when the target does not exist.
    #[error("Target not found: {0}")]
    TargetNotFound(String),

    /// Error when a write was based on a stale resource version.
    #[error("Conflict writing {name}: expected version {expected}, found {actual}")]
    Conflict {
        /// Name of the target.
        name: String,

        /// Version the writer based its change on.
        expected: u64,

        /// Version currently stored.
        actual: u64,
    },

    /// Error when the store has been switched offline.
    #[error("Store unavailable")]
    Unavailable,
}

impl StatusStoreError for Error {
    fn kind(&self) -> StatusStoreErrorKind {
        match self {
            Self::TargetNotFound(_) => StatusStoreErrorKind::NotFound,
            Self::Conflict { .. } => StatusStoreErrorKind::Conflict,
            Self::Unavailable => StatusStoreErrorKind::Unavailable,
        }
    }
}
