//! # Execution Snapshots
//!
//! Read-only views over the task and stage collections owned by the external
//! execution subsystem. The rollup engine only needs a status per task and a
//! `skippable` flag per stage, so any persistence type can take part by
//! implementing [`HasStatus`] and [`StageView`].
//!
//! The snapshot structs here are immutable copies a caller takes before
//! invoking a rollup, so counts are never computed over a collection that
//! changes mid-iteration.

pub mod request;
pub mod stage;
pub mod task;

pub use request::RequestSnapshot;
pub use stage::StageSnapshot;
pub use task::TaskSnapshot;

use crate::status::OperationStatus;

/// Anything exposing a single current status.
pub trait HasStatus {
    fn status(&self) -> OperationStatus;
}

/// A stage: an ordered group of tasks with a skippable flag.
pub trait StageView {
    type Task: HasStatus;

    fn is_skippable(&self) -> bool;

    fn tasks(&self) -> &[Self::Task];
}

impl HasStatus for OperationStatus {
    fn status(&self) -> OperationStatus {
        *self
    }
}
