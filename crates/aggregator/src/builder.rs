//! Accumulator for the three composite conditions.

use chrono::{DateTime, Utc};
use fleet_status_store::{CompositeCondition, CompositeStatus, ConditionStatus};

#[derive(Clone, Debug, Default)]
struct Slot {
    status: ConditionStatus,
    reason: String,
    message: String,
}

impl Slot {
    fn resolve(
        &self,
        previous: Option<&CompositeCondition>,
        now: DateTime<Utc>,
    ) -> CompositeCondition {
        let last_transition_time = previous
            .filter(|previous| previous.status == self.status)
            .map_or(now, |previous| previous.last_transition_time);

        CompositeCondition {
            status: self.status,
            reason: self.reason.clone(),
            message: self.message.clone(),
            last_transition_time,
        }
    }
}

/// Records the composite conditions it is told to; it never decides them itself.
///
/// Setters may be called any number of times and the last call wins. Transition
/// times are computed against the status the builder was seeded with, so values
/// overwritten within one invocation never count as transitions.
#[derive(Clone, Debug)]
pub struct StatusBuilder {
    previous: Option<CompositeStatus>,
    now: DateTime<Utc>,
    progressing: Slot,
    degraded: Slot,
    available: Slot,
}

impl StatusBuilder {
    /// Creates a builder with every slot `Unknown`.
    ///
    /// `previous` is the currently persisted status, if any; `now` is the
    /// transition time stamped on slots whose status differs from it.
    #[must_use]
    pub fn new(previous: Option<CompositeStatus>, now: DateTime<Utc>) -> Self {
        Self {
            previous,
            now,
            progressing: Slot::default(),
            degraded: Slot::default(),
            available: Slot::default(),
        }
    }

    /// Sets the `Progressing` condition.
    pub fn with_progressing(&mut self, is_true: bool, reason: &str) -> &mut Self {
        self.progressing = Slot {
            status: ConditionStatus::from_bool(is_true),
            reason: reason.to_string(),
            message: String::new(),
        };
        self
    }

    /// Sets the `Degraded` condition.
    pub fn with_degraded(&mut self, is_true: bool) -> &mut Self {
        self.degraded = Slot {
            status: ConditionStatus::from_bool(is_true),
            ..Slot::default()
        };
        self
    }

    /// Sets the `Available` condition.
    pub fn with_available(&mut self, is_true: bool, reason: &str, message: &str) -> &mut Self {
        self.available = Slot {
            status: ConditionStatus::from_bool(is_true),
            reason: reason.to_string(),
            message: message.to_string(),
        };
        self
    }

    /// Snapshot of the conditions recorded so far.
    #[must_use]
    pub fn status(&self) -> CompositeStatus {
        let previous = self.previous.as_ref();

        CompositeStatus {
            progressing: self
                .progressing
                .resolve(previous.map(|p| &p.progressing), self.now),
            degraded: self.degraded.resolve(previous.map(|p| &p.degraded), self.now),
            available: self
                .available
                .resolve(previous.map(|p| &p.available), self.now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_unset_slots_are_unknown() {
        let status = StatusBuilder::new(None, at(10)).status();

        assert_eq!(status.progressing.status, ConditionStatus::Unknown);
        assert_eq!(status.degraded.status, ConditionStatus::Unknown);
        assert_eq!(status.available.status, ConditionStatus::Unknown);
    }

    #[test]
    fn test_last_write_wins() {
        let mut builder = StatusBuilder::new(None, at(10));
        builder
            .with_progressing(true, "")
            .with_degraded(false)
            .with_available(false, "", "");
        builder.with_available(true, "POs Are Healthy", "All POs in a successful state");

        let status = builder.status();

        assert!(status.progressing.is_true());
        assert!(!status.degraded.is_true());
        assert!(status.available.is_true());
        assert_eq!(status.available.reason, "POs Are Healthy");
        assert_eq!(status.available.message, "All POs in a successful state");
        assert_eq!(status.available.last_transition_time, at(10));
    }

    #[test]
    fn test_unchanged_status_keeps_transition_time() {
        let mut first = StatusBuilder::new(None, at(10));
        first
            .with_progressing(true, "")
            .with_degraded(false)
            .with_available(true, "POs Are Healthy", "");
        let persisted = first.status();

        let mut second = StatusBuilder::new(Some(persisted.clone()), at(20));
        second
            .with_progressing(true, "")
            .with_degraded(false)
            .with_available(false, "", "");
        second.with_available(true, "POs Are Healthy", "");

        assert_eq!(second.status(), persisted);
    }

    #[test]
    fn test_changed_status_takes_new_transition_time() {
        let mut first = StatusBuilder::new(None, at(10));
        first
            .with_progressing(true, "")
            .with_degraded(false)
            .with_available(true, "", "");
        let persisted = first.status();

        let mut second = StatusBuilder::new(Some(persisted), at(20));
        second
            .with_progressing(true, "")
            .with_degraded(true)
            .with_available(false, "PO In An Error State", "a is failing");
        let status = second.status();

        assert_eq!(status.progressing.last_transition_time, at(10));
        assert_eq!(status.degraded.last_transition_time, at(20));
        assert_eq!(status.available.last_transition_time, at(20));
    }
}
