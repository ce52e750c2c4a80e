use super::{HasStatus, StageView, TaskSnapshot};
use crate::status::{CalculatedStatus, OperationStatus, RollupPolicy};
use serde::{Deserialize, Serialize};

/// Point-in-time copy of a stage and its tasks.
///
/// A stage has no stored status of its own; [`StageSnapshot::calculate`]
/// derives it from the tasks every time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSnapshot {
    pub stage_id: i64,
    pub context: String,
    /// Failed, aborted or timed-out tasks do not fail a skippable stage
    pub skippable: bool,
    pub tasks: Vec<TaskSnapshot>,
}

impl StageSnapshot {
    pub fn new(stage_id: i64, context: impl Into<String>, skippable: bool) -> Self {
        Self {
            stage_id,
            context: context.into(),
            skippable,
            tasks: Vec::new(),
        }
    }

    pub fn with_task(mut self, task: TaskSnapshot) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn calculate(&self, policy: &RollupPolicy) -> CalculatedStatus {
        policy.calculate(&self.tasks, self.skippable)
    }

    /// Tasks currently in `status`.
    pub fn tasks_in(&self, status: OperationStatus) -> impl Iterator<Item = &TaskSnapshot> {
        self.tasks.iter().filter(move |task| task.status() == status)
    }
}

impl StageView for StageSnapshot {
    type Task = TaskSnapshot;

    fn is_skippable(&self) -> bool {
        self.skippable
    }

    fn tasks(&self) -> &[TaskSnapshot] {
        &self.tasks
    }
}
