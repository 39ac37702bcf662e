//! Classification of fleet members into healthy and failing.

use fleet_members::Member;

/// Members found failing during one inspection.
///
/// `failing_members` and `failing_errors` are parallel: entry `i` of each
/// describes the same failing condition, so a member with two failing
/// conditions appears twice.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FailureReport<'a> {
    /// Members carrying a failing condition, in traversal order.
    pub failing_members: Vec<&'a Member>,

    /// One message per failing condition.
    pub failing_errors: Vec<String>,
}

impl FailureReport<'_> {
    /// Folds every message into one, preserving order.
    ///
    /// A single message is returned as-is; several are rendered as
    /// `[first, second, ...]`.
    #[must_use]
    pub fn message(&self) -> String {
        match self.failing_errors.as_slice() {
            [single] => single.clone(),
            errors => format!("[{}]", errors.join(", ")),
        }
    }
}

/// Inspects `members` and reports the ones with a condition in the failure vocabulary.
///
/// Returns `None` when no member is failing, including when `members` is empty.
#[must_use]
pub fn inspect(members: &[Member]) -> Option<FailureReport<'_>> {
    let mut failing_members = Vec::new();
    let mut failing_errors = Vec::new();

    for member in members {
        for condition in member.conditions() {
            if condition.reason.is_failure() {
                failing_members.push(member);
                failing_errors.push(format!(
                    "{} is failing: \"{}\"",
                    member.name(),
                    condition.reason
                ));
            }
        }
    }

    if failing_members.is_empty() {
        return None;
    }

    Some(FailureReport {
        failing_members,
        failing_errors,
    })
}

#[cfg(test)]
mod tests {
    use fleet_members::{Condition, ConditionReason, ConditionStatus};

    use super::*;

    fn condition(reason: ConditionReason) -> Condition {
        Condition::installed(ConditionStatus::False, reason)
    }

    #[test]
    fn test_empty_fleet_is_healthy() {
        assert_eq!(inspect(&[]), None);
    }

    #[test]
    fn test_members_without_conditions_are_healthy() {
        let members = vec![Member::new("a", vec![]), Member::new("b", vec![])];

        assert_eq!(inspect(&members), None);
    }

    #[test]
    fn test_non_failure_reasons_are_healthy() {
        let members = vec![Member::new(
            "a",
            vec![
                condition(ConditionReason::ApplyPending),
                condition(ConditionReason::ApplySuccessful),
                condition(ConditionReason::Unknown),
            ],
        )];

        assert_eq!(inspect(&members), None);
    }

    #[test]
    fn test_single_failing_member() {
        let members = vec![
            Member::new("A", vec![]),
            Member::new("B", vec![condition(ConditionReason::SourceFailed)]),
        ];

        let report = inspect(&members).unwrap();

        assert_eq!(report.failing_members, vec![&members[1]]);
        assert_eq!(report.failing_errors, ["B is failing: \"SourceFailed\""]);
        assert_eq!(report.message(), "B is failing: \"SourceFailed\"");
    }

    #[test]
    fn test_one_message_per_failing_condition() {
        let members = vec![
            Member::new(
                "a",
                vec![
                    condition(ConditionReason::SourceFailed),
                    condition(ConditionReason::ApplySuccessful),
                    condition(ConditionReason::ApplyFailed),
                ],
            ),
            Member::new("b", vec![condition(ConditionReason::ApplyFailed)]),
        ];

        let report = inspect(&members).unwrap();

        assert_eq!(
            report.failing_members,
            vec![&members[0], &members[0], &members[1]]
        );
        assert_eq!(
            report.failing_errors,
            [
                "a is failing: \"SourceFailed\"",
                "a is failing: \"ApplyFailed\"",
                "b is failing: \"ApplyFailed\"",
            ]
        );
        assert_eq!(
            report.message(),
            "[a is failing: \"SourceFailed\", a is failing: \"ApplyFailed\", b is failing: \"ApplyFailed\"]"
        );
    }

    #[test]
    fn test_message_is_stable_across_runs() {
        let members = vec![
            Member::new("z", vec![condition(ConditionReason::ApplyFailed)]),
            Member::new("m", vec![condition(ConditionReason::SourceFailed)]),
        ];

        let first = inspect(&members).unwrap().message();
        let second = inspect(&members).unwrap().message();

        assert_eq!(first, second);
        assert!(first.starts_with("[z is failing"));
    }
}
