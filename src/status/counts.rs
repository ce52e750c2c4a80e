//! # Status Counting
//!
//! Turns a snapshot of unit statuses into a dense, zero-initialised count per
//! status. This is the only place that applies the completion folding and the
//! `IN_PROGRESS` reconciliation, so every rollup shares exactly one arithmetic.
//!
//! ## Folding
//!
//! A status that belongs to the [`CompletionCategory`] but is not `COMPLETED`
//! itself is counted twice: once in its own bucket and once in `COMPLETED`.
//!
//! ## Reconciliation
//!
//! The `IN_PROGRESS` bucket is never counted directly. It is overwritten with
//! `total - completed - queued - pending`, which makes
//! `completed + queued + pending + in_progress == total` hold for every input.

use super::states::{CompletionCategory, OperationStatus};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::ops::Index;

/// Per-status counts indexed by [`OperationStatus::ordinal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    counts: [usize; OperationStatus::COUNT],
    total: usize,
}

impl StatusCounts {
    pub fn get(&self, status: OperationStatus) -> usize {
        self.counts[status.ordinal()]
    }

    /// Number of units the counts were computed from.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// `completed + queued + pending + in_progress`. Always equals [`total`](Self::total).
    pub fn reconciled_total(&self) -> usize {
        self.get(OperationStatus::Completed)
            + self.get(OperationStatus::Queued)
            + self.get(OperationStatus::Pending)
            + self.get(OperationStatus::InProgress)
    }

    /// Iterate over every status with its count, including zero counts.
    pub fn iter(&self) -> impl Iterator<Item = (OperationStatus, usize)> + '_ {
        OperationStatus::ALL
            .iter()
            .map(move |status| (*status, self.get(*status)))
    }
}

impl Index<OperationStatus> for StatusCounts {
    type Output = usize;

    fn index(&self, status: OperationStatus) -> &Self::Output {
        &self.counts[status.ordinal()]
    }
}

impl Serialize for StatusCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(OperationStatus::COUNT))?;
        for (status, count) in self.iter() {
            map.serialize_entry(status.as_str(), &count)?;
        }
        map.end()
    }
}

/// Count statuses using the default [`CompletionCategory`].
pub fn count_by_status<I>(statuses: I) -> StatusCounts
where
    I: IntoIterator<Item = OperationStatus>,
{
    count_by_status_with(statuses, &CompletionCategory::default())
}

/// Count statuses, folding members of `category` into `COMPLETED` and
/// reconciling `IN_PROGRESS`.
pub fn count_by_status_with<I>(statuses: I, category: &CompletionCategory) -> StatusCounts
where
    I: IntoIterator<Item = OperationStatus>,
{
    let mut counts = [0usize; OperationStatus::COUNT];
    let mut total = 0usize;

    for status in statuses {
        total += 1;
        if status != OperationStatus::Completed && category.contains(status) {
            counts[OperationStatus::Completed.ordinal()] += 1;
        }
        counts[status.ordinal()] += 1;
    }

    // Each unit lands in at most one of completed/queued/pending, so this cannot underflow.
    counts[OperationStatus::InProgress.ordinal()] = total
        - counts[OperationStatus::Completed.ordinal()]
        - counts[OperationStatus::Queued.ordinal()]
        - counts[OperationStatus::Pending.ordinal()];

    StatusCounts { counts, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OperationStatus::*;

    #[test]
    fn test_empty_input_is_all_zero() {
        let counts = count_by_status(Vec::new());
        assert!(counts.is_empty());
        assert!(counts.iter().all(|(_, count)| count == 0));
    }

    #[test]
    fn test_every_status_present_in_iteration() {
        let counts = count_by_status([Completed]);
        assert_eq!(counts.iter().count(), OperationStatus::COUNT);
    }

    #[test]
    fn test_failed_is_folded_into_completed() {
        let counts = count_by_status([Completed, Failed, Pending]);
        assert_eq!(counts[Failed], 1);
        assert_eq!(counts[Completed], 2);
        assert_eq!(counts[Pending], 1);
        assert_eq!(counts[InProgress], 0);
        assert_eq!(counts.reconciled_total(), counts.total());
    }

    #[test]
    fn test_in_progress_is_recomputed() {
        // Holding units are neither completed, queued nor pending
        let counts = count_by_status([Holding, HoldingFailed, Queued, InProgress]);
        assert_eq!(counts[InProgress], 3);
        assert_eq!(counts[Holding], 1);
        assert_eq!(counts[HoldingFailed], 1);
        assert_eq!(counts.reconciled_total(), 4);
    }

    #[test]
    fn test_category_controls_folding() {
        let counts = count_by_status_with([Failed, Completed], &CompletionCategory::completed_only());
        assert_eq!(counts[Completed], 1);
        assert_eq!(counts[Failed], 1);
        // With no folding the failed unit is reconciled as in progress
        assert_eq!(counts[InProgress], 1);
    }

    #[test]
    fn test_counts_serialize_as_status_map() {
        let counts = count_by_status([Queued, Queued]);
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json["QUEUED"], 2);
        assert_eq!(json["ABORTED"], 0);
    }
}
