//! Abstract interface for listing the members of a fleet whose health is aggregated.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::error::Error;
use std::fmt::{self, Debug, Display};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Tri-state status shared by member conditions and composite conditions.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ConditionStatus {
    /// The condition holds.
    True,

    /// The condition does not hold.
    False,

    /// The condition could not be determined.
    #[default]
    Unknown,
}

impl ConditionStatus {
    /// Maps a boolean onto `True`/`False`.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Reason codes a member may report on its conditions.
///
/// The set is closed: anything the reconciler reports that is not listed here
/// deserializes as [`ConditionReason::Unknown`]. The original reason string is
/// not kept, so an unrecognised reason serializes back as `"Unknown"`; do not
/// round-trip member JSON through these types.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ConditionReason {
    /// The member's source (bundle, catalog entry) could not be resolved.
    SourceFailed,

    /// The member's manifests could not be applied.
    ApplyFailed,

    /// The member is waiting for its manifests to be applied.
    ApplyPending,

    /// The member's manifests were applied.
    ApplySuccessful,

    /// Any reason outside the known vocabulary.
    #[serde(other)]
    Unknown,
}

impl ConditionReason {
    /// Reasons that mark a member as failing.
    pub const FAILURES: [Self; 2] = [Self::SourceFailed, Self::ApplyFailed];

    /// Whether this reason belongs to the failure vocabulary.
    #[must_use]
    pub fn is_failure(self) -> bool {
        Self::FAILURES.contains(&self)
    }

    /// The wire name of the reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SourceFailed => "SourceFailed",
            Self::ApplyFailed => "ApplyFailed",
            Self::ApplyPending => "ApplyPending",
            Self::ApplySuccessful => "ApplySuccessful",
            Self::Unknown => "Unknown",
        }
    }
}

impl Display for ConditionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single observation reported on a member's status.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// The condition type, e.g. `Installed`.
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Whether the condition holds.
    #[serde(default)]
    pub status: ConditionStatus,

    /// Machine-readable reason code.
    pub reason: ConditionReason,

    /// Free-text detail.
    #[serde(default)]
    pub message: String,
}

impl Condition {
    /// Creates an `Installed` condition carrying the given reason.
    #[must_use]
    pub fn installed(status: ConditionStatus, reason: ConditionReason) -> Self {
        Self {
            kind: "Installed".to_string(),
            status,
            reason,
            message: String::new(),
        }
    }

    /// Sets the free-text detail.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Observed status of a member.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MemberStatus {
    /// Conditions in the order the reconciler reported them.
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// A fleet member. Owned by the reconciler that produces it; read-only here.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Unique name of the member.
    pub name: String,

    /// Last observed status.
    #[serde(default)]
    pub status: MemberStatus,
}

impl Member {
    /// Creates a member with the given conditions.
    #[must_use]
    pub fn new(name: impl Into<String>, conditions: Vec<Condition>) -> Self {
        Self {
            name: name.into(),
            status: MemberStatus { conditions },
        }
    }

    /// The member's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The member's conditions.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.status.conditions
    }
}

/// The kind of member source error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MemberSourceErrorKind {
    /// The backing store could not be reached.
    Unavailable,

    /// The stored data could not be decoded.
    Decode,

    /// Other/unknown error
    Other,
}

impl Display for MemberSourceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Marker trait for `MemberSource` errors
pub trait MemberSourceError: Debug + Error + Send + Sync + 'static {
    /// Returns the kind of this error
    fn kind(&self) -> MemberSourceErrorKind;
}

/// Read-only access to a point-in-time snapshot of the fleet.
#[async_trait]
pub trait MemberSource
where
    Self: Send + Sync + 'static,
{
    /// The error type for this source.
    type Error: MemberSourceError;

    /// Lists every member currently present.
    async fn list(&self) -> Result<Vec<Member>, Self::Error>;
}
