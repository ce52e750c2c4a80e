use super::HasStatus;
use crate::status::OperationStatus;
use serde::{Deserialize, Serialize};

/// Point-in-time copy of a single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub task_id: i64,
    pub host_name: String,
    /// Component or action the task runs, e.g. `NAMENODE`
    pub role: String,
    pub status: OperationStatus,
}

impl TaskSnapshot {
    pub fn new(
        task_id: i64,
        host_name: impl Into<String>,
        role: impl Into<String>,
        status: OperationStatus,
    ) -> Self {
        Self {
            task_id,
            host_name: host_name.into(),
            role: role.into(),
            status,
        }
    }
}

impl HasStatus for TaskSnapshot {
    fn status(&self) -> OperationStatus {
        self.status
    }
}
