//! Error types for the in-memory member source.

use fleet_members::{MemberSourceError, MemberSourceErrorKind};
use thiserror::Error;

/// Error type for the in-memory member source.
#[derive(Debug, Error)]
pub enum Error {
    /// Error when loading or parsing the fleet file.
    #[error("Fleet file error: {0}")]
    FleetFile(String),

    /// Error when a member is not present.
    #[error("Member not found: {0}")]
    MemberNotFound(String),
}

impl MemberSourceError for Error {
    fn kind(&self) -> MemberSourceErrorKind {
        match self {
            Self::FleetFile(_) => MemberSourceErrorKind::Decode,
            Self::MemberNotFound(_) => MemberSourceErrorKind::Other,
        }
    }
}
