use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a task, stage or request within a cluster-wide operation.
///
/// The declaration order is the ordinal used by [`StatusCounts`](super::StatusCounts);
/// it is not the rollup priority order, see [`ROLLUP_PRIORITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    /// Created but not yet scheduled
    Pending,
    /// Handed to the dispatch layer, waiting for an executor
    Queued,
    /// Executing on a host
    InProgress,
    /// Paused, waiting for operator input
    Holding,
    /// Finished successfully
    Completed,
    /// Finished with an error
    Failed,
    /// Failed and paused, waiting for operator input
    HoldingFailed,
    /// Did not finish within its timeout
    Timedout,
    /// Timed out and paused, waiting for operator input
    HoldingTimedout,
    /// Cancelled before finishing
    Aborted,
    /// Failed inside a skippable stage and was skipped automatically
    SkippedFailed,
}

/// Rollup priority, highest first. `Pending` is handled separately since it only
/// wins when every unit is pending. Holding statuses win on any count, failures
/// only outside skippable stages, `Completed` only when every unit completed,
/// and `InProgress` is the fallback.
pub const ROLLUP_PRIORITY: &[OperationStatus] = &[
    OperationStatus::Holding,
    OperationStatus::HoldingFailed,
    OperationStatus::HoldingTimedout,
    OperationStatus::Failed,
    OperationStatus::Aborted,
    OperationStatus::Timedout,
    OperationStatus::Completed,
    OperationStatus::InProgress,
];

impl OperationStatus {
    /// Number of statuses in the closed set.
    pub const COUNT: usize = 11;

    /// Every status, in ordinal order.
    pub const ALL: [OperationStatus; Self::COUNT] = [
        Self::Pending,
        Self::Queued,
        Self::InProgress,
        Self::Holding,
        Self::Completed,
        Self::Failed,
        Self::HoldingFailed,
        Self::Timedout,
        Self::HoldingTimedout,
        Self::Aborted,
        Self::SkippedFailed,
    ];

    /// Dense index of this status into [`OperationStatus::ALL`].
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Check if the status is waiting on an operator
    pub fn is_holding_state(&self) -> bool {
        matches!(
            self,
            Self::Holding | Self::HoldingFailed | Self::HoldingTimedout
        )
    }

    /// Check if this is a failure of any kind, held or not
    pub fn is_failed_state(&self) -> bool {
        matches!(
            self,
            Self::Failed
                | Self::Timedout
                | Self::Aborted
                | Self::HoldingFailed
                | Self::HoldingTimedout
        )
    }

    /// Check if the unit has been picked up but has not reached a terminal state
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::Queued | Self::InProgress) || self.is_holding_state()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Queued => "QUEUED",
            Self::InProgress => "IN_PROGRESS",
            Self::Holding => "HOLDING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::HoldingFailed => "HOLDING_FAILED",
            Self::Timedout => "TIMEDOUT",
            Self::HoldingTimedout => "HOLDING_TIMEDOUT",
            Self::Aborted => "ABORTED",
            Self::SkippedFailed => "SKIPPED_FAILED",
        }
    }
}

impl Default for OperationStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OperationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid operation status: {s}"))
    }
}

/// Membership table for the "terminal-success" category used when counting.
///
/// Members other than `Completed` are counted twice by
/// [`count_by_status`](super::count_by_status): once under their own bucket and
/// once under `Completed`. `Completed` itself is always a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionCategory {
    members: [bool; OperationStatus::COUNT],
}

impl CompletionCategory {
    /// Category containing only `Completed`.
    pub fn completed_only() -> Self {
        let mut members = [false; OperationStatus::COUNT];
        members[OperationStatus::Completed.ordinal()] = true;
        Self { members }
    }

    /// Build a category from an explicit member list. `Completed` is added if absent.
    pub fn from_members<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = OperationStatus>,
    {
        let mut category = Self::completed_only();
        for status in statuses {
            category.members[status.ordinal()] = true;
        }
        category
    }

    pub fn contains(&self, status: OperationStatus) -> bool {
        self.members[status.ordinal()]
    }

    /// Members in ordinal order.
    pub fn members(&self) -> Vec<OperationStatus> {
        OperationStatus::ALL
            .iter()
            .copied()
            .filter(|status| self.contains(*status))
            .collect()
    }
}

/// Every terminal status counts toward completion.
impl Default for CompletionCategory {
    fn default() -> Self {
        Self::from_members([
            OperationStatus::Completed,
            OperationStatus::Failed,
            OperationStatus::Timedout,
            OperationStatus::Aborted,
            OperationStatus::SkippedFailed,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_match_all() {
        for (index, status) in OperationStatus::ALL.iter().enumerate() {
            assert_eq!(status.ordinal(), index);
        }
    }

    #[test]
    fn test_status_parsing_round_trips_display() {
        for status in OperationStatus::ALL {
            let parsed: OperationStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert_eq!(
            "in_progress".parse::<OperationStatus>().unwrap(),
            OperationStatus::InProgress
        );
        assert!("RUNNING".parse::<OperationStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&OperationStatus::HoldingTimedout).unwrap();
        assert_eq!(json, "\"HOLDING_TIMEDOUT\"");
        let status: OperationStatus = serde_json::from_str("\"SKIPPED_FAILED\"").unwrap();
        assert_eq!(status, OperationStatus::SkippedFailed);
    }

    #[test]
    fn test_state_predicates() {
        assert!(OperationStatus::HoldingFailed.is_holding_state());
        assert!(OperationStatus::HoldingFailed.is_failed_state());
        assert!(!OperationStatus::SkippedFailed.is_failed_state());
        assert!(OperationStatus::Queued.is_in_progress());
        assert!(!OperationStatus::Pending.is_in_progress());
        assert!(!OperationStatus::Completed.is_in_progress());
    }

    #[test]
    fn test_default_completion_category() {
        let category = CompletionCategory::default();
        assert_eq!(
            category.members(),
            vec![
                OperationStatus::Completed,
                OperationStatus::Failed,
                OperationStatus::Timedout,
                OperationStatus::Aborted,
                OperationStatus::SkippedFailed,
            ]
        );
        assert!(!category.contains(OperationStatus::HoldingFailed));
        assert!(!category.contains(OperationStatus::Pending));
    }

    #[test]
    fn test_custom_category_always_contains_completed() {
        let category = CompletionCategory::from_members([OperationStatus::Aborted]);
        assert!(category.contains(OperationStatus::Completed));
        assert!(category.contains(OperationStatus::Aborted));
        assert!(!category.contains(OperationStatus::Failed));
        assert_eq!(
            CompletionCategory::completed_only().members(),
            vec![OperationStatus::Completed]
        );
    }
}
