//! # Operation Status
//!
//! Closed status model for tasks, stages and requests, and the pure rollup
//! engine that derives stage and request status and progress from task
//! statuses.

pub mod counts;
pub mod rollup;
pub mod states;

pub use counts::{count_by_status, count_by_status_with, StatusCounts};
pub use rollup::{
    progress_percent, progress_percent_with, rollup_request, summary_status, CalculatedStatus,
    RollupPolicy, StatusWeights,
};
pub use states::{CompletionCategory, OperationStatus, ROLLUP_PRIORITY};
