//! Abstract interface for reading and patching the composite status of the fleet.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::error::Error;
use std::fmt::{self, Debug, Display};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use fleet_members::ConditionStatus;

/// One slot of the composite status.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeCondition {
    /// Whether the condition holds.
    pub status: ConditionStatus,

    /// Machine-readable reason, empty when none was given.
    #[serde(default)]
    pub reason: String,

    /// Human-readable detail, empty when none was given.
    #[serde(default)]
    pub message: String,

    /// When `status` last changed.
    pub last_transition_time: DateTime<Utc>,
}

impl CompositeCondition {
    /// Whether the condition is `True`.
    #[must_use]
    pub fn is_true(&self) -> bool {
        self.status == ConditionStatus::True
    }
}

/// Aggregated health of the fleet as persisted on the composite target.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CompositeStatus {
    /// Whether an evaluation is still under way.
    pub progressing: CompositeCondition,

    /// Whether at least one member is failing.
    pub degraded: CompositeCondition,

    /// Whether the fleet as a whole is usable.
    pub available: CompositeCondition,
}

/// The well-known object whose status carries the aggregate.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeTarget {
    /// Name of the target.
    pub name: String,

    /// Opaque version bumped on every write, used for optimistic concurrency.
    pub resource_version: u64,

    /// Last persisted status, if any was ever written.
    #[serde(default)]
    pub status: Option<CompositeStatus>,
}

impl CompositeTarget {
    /// Creates a target that has never had a status written.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_version: 0,
            status: None,
        }
    }
}

/// The kind of status store error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StatusStoreErrorKind {
    /// The target does not exist.
    NotFound,

    /// The write was based on a stale version of the target.
    Conflict,

    /// The backing store could not be reached.
    Unavailable,

    /// Other/unknown error
    Other,
}

impl Display for StatusStoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Marker trait for `StatusStore` errors
pub trait StatusStoreError: Debug + Error + Send + Sync + 'static {
    /// Returns the kind of this error
    fn kind(&self) -> StatusStoreErrorKind;
}

/// Storage holding the composite target and its status sub-resource.
#[async_trait]
pub trait StatusStore
where
    Self: Send + Sync + 'static,
{
    /// The error type for this store.
    type Error: StatusStoreError;

    /// Fetches the target, returning `None` if it does not exist.
    async fn get(&self, name: &str) -> Result<Option<CompositeTarget>, Self::Error>;

    /// Replaces the status of `target`, leaving every other field untouched.
    ///
    /// Implementations must reject the write with a
    /// [`StatusStoreErrorKind::Conflict`] error when `target.resource_version`
    /// no longer matches the stored version.
    async fn patch_status(
        &self,
        target: &CompositeTarget,
        status: CompositeStatus,
    ) -> Result<CompositeTarget, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_serialization() {
        let target = CompositeTarget::new("platform-operators-aggregated");
        let json = serde_json::to_value(&target).unwrap();

        assert_eq!(json["name"], "platform-operators-aggregated");
        assert_eq!(json["resourceVersion"], 0);
        assert!(json["status"].is_null());
    }

    #[test]
    fn test_condition_serialization() {
        let condition = CompositeCondition {
            status: ConditionStatus::True,
            reason: "POs Are Healthy".to_string(),
            message: String::new(),
            last_transition_time: DateTime::from_timestamp(0, 0).unwrap(),
        };
        let json = serde_json::to_value(&condition).unwrap();

        assert_eq!(json["status"], "True");
        assert_eq!(json["lastTransitionTime"], "1970-01-01T00:00:00Z");
        assert!(condition.is_true());
    }
}
