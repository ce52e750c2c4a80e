//! # Status Rollup
//!
//! Derives the status and completion percentage of a stage or a whole request
//! from the statuses of its tasks. All functions are pure: they read a snapshot
//! supplied by the caller and never mutate it.
//!
//! ## Summary priority
//!
//! ```text
//! PENDING            iff every unit is pending
//! HOLDING            \
//! HOLDING_FAILED      > first with a non-zero count
//! HOLDING_TIMEDOUT   /
//! FAILED             \
//! ABORTED             > first with a non-zero count, unless skippable
//! TIMEDOUT           /
//! COMPLETED          iff the completed count equals the total
//! IN_PROGRESS        otherwise
//! ```
//!
//! ## Request rollup
//!
//! Each stage is summarised from its own tasks with its own `skippable` flag.
//! The distinct stage statuses are then summarised again with
//! `skippable = false`, while the request percentage is computed from the union
//! of every task of every stage.

use super::counts::{count_by_status_with, StatusCounts};
use super::states::{CompletionCategory, OperationStatus, ROLLUP_PRIORITY};
use crate::models::{HasStatus, StageView};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Weight each bucket contributes toward completion, as a fraction of one unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusWeights {
    /// Weight of a queued unit
    pub queued: f64,
    /// Weight of an in-progress or holding unit
    pub active: f64,
    /// Weight of a completed unit
    pub completed: f64,
}

impl Default for StatusWeights {
    fn default() -> Self {
        Self {
            queued: crate::constants::weights::QUEUED,
            active: crate::constants::weights::ACTIVE,
            completed: crate::constants::weights::COMPLETED,
        }
    }
}

/// Counting and weighting rules applied by a rollup.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RollupPolicy {
    pub completion: CompletionCategory,
    pub weights: StatusWeights,
}

impl RollupPolicy {
    pub fn new(completion: CompletionCategory, weights: StatusWeights) -> Self {
        Self {
            completion,
            weights,
        }
    }

    pub fn count<I>(&self, statuses: I) -> StatusCounts
    where
        I: IntoIterator<Item = OperationStatus>,
    {
        count_by_status_with(statuses, &self.completion)
    }

    pub fn progress_percent(&self, counts: &StatusCounts) -> f64 {
        progress_percent_with(counts, counts.total(), &self.weights)
    }

    /// Status and percent of a single stage (or any flat task collection).
    pub fn calculate<T: HasStatus>(&self, tasks: &[T], skippable: bool) -> CalculatedStatus {
        let counts = self.count(tasks.iter().map(HasStatus::status));
        let status = summary_status(&counts, counts.total(), skippable);
        let percent = self.progress_percent(&counts);

        debug!(
            total = counts.total(),
            skippable = skippable,
            status = %status,
            percent = percent,
            "Calculated stage status"
        );

        CalculatedStatus { status, percent }
    }

    /// Status and percent of a request made of ordered stages.
    pub fn rollup_request<S: StageView>(&self, stages: &[S]) -> CalculatedStatus {
        let mut stage_statuses = BTreeSet::new();
        let mut task_statuses = Vec::new();

        for stage in stages {
            let tasks = stage.tasks();
            let stage_counts = self.count(tasks.iter().map(HasStatus::status));
            stage_statuses.insert(summary_status(
                &stage_counts,
                stage_counts.total(),
                stage.is_skippable(),
            ));
            task_statuses.extend(tasks.iter().map(HasStatus::status));
        }

        let stage_counts = self.count(stage_statuses.iter().copied());
        let status = summary_status(&stage_counts, stage_statuses.len(), false);

        let task_counts = self.count(task_statuses);
        let percent = self.progress_percent(&task_counts);

        debug!(
            stages = stages.len(),
            distinct_stage_statuses = stage_statuses.len(),
            tasks = task_counts.total(),
            status = %status,
            percent = percent,
            "Rolled up request status"
        );

        CalculatedStatus { status, percent }
    }
}

/// Overall status and completion percentage of a stage or request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatedStatus {
    pub status: OperationStatus,
    /// Completion in `[0, 100]`
    pub percent: f64,
}

impl CalculatedStatus {
    /// Calculate from a flat task collection with the default policy.
    pub fn from_tasks<T: HasStatus>(tasks: &[T], skippable: bool) -> Self {
        RollupPolicy::default().calculate(tasks, skippable)
    }

    /// Calculate from ordered stages with the default policy.
    pub fn from_stages<S: StageView>(stages: &[S]) -> Self {
        RollupPolicy::default().rollup_request(stages)
    }

    /// Calculate from raw statuses with the default policy.
    pub fn from_statuses(statuses: &[OperationStatus], skippable: bool) -> Self {
        RollupPolicy::default().calculate(statuses, skippable)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            OperationStatus::Completed
                | OperationStatus::Failed
                | OperationStatus::Aborted
                | OperationStatus::Timedout
        )
    }
}

/// Summarise counts into a single status by walking [`ROLLUP_PRIORITY`].
pub fn summary_status(counts: &StatusCounts, total: usize, skippable: bool) -> OperationStatus {
    use OperationStatus::*;

    if counts[Pending] == total {
        return Pending;
    }

    ROLLUP_PRIORITY
        .iter()
        .copied()
        .find(|status| match status {
            Completed => counts[Completed] == total,
            InProgress => true,
            held if held.is_holding_state() => counts[*held] > 0,
            failed => !skippable && counts[*failed] > 0,
        })
        .unwrap_or(InProgress)
}

/// Completion percentage with the default weights.
pub fn progress_percent(counts: &StatusCounts, total: usize) -> f64 {
    progress_percent_with(counts, total, &StatusWeights::default())
}

pub fn progress_percent_with(counts: &StatusCounts, total: usize, weights: &StatusWeights) -> f64 {
    use OperationStatus::*;

    if total == 0 {
        return 0.0;
    }

    let active = counts[InProgress] + counts[Holding] + counts[HoldingFailed] + counts[HoldingTimedout];
    let weighted = counts[Queued] as f64 * weights.queued
        + active as f64 * weights.active
        + counts[Completed] as f64 * weights.completed;

    weighted / total as f64 * 100.0
}

/// Request rollup with the default policy.
pub fn rollup_request<S: StageView>(stages: &[S]) -> CalculatedStatus {
    RollupPolicy::default().rollup_request(stages)
}
