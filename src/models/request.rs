use super::StageSnapshot;
use crate::status::{CalculatedStatus, RollupPolicy};
use serde::{Deserialize, Serialize};

/// Point-in-time copy of one cluster-wide operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestSnapshot {
    pub request_id: i64,
    pub cluster_name: String,
    pub stages: Vec<StageSnapshot>,
}

impl RequestSnapshot {
    pub fn new(request_id: i64, cluster_name: impl Into<String>) -> Self {
        Self {
            request_id,
            cluster_name: cluster_name.into(),
            stages: Vec::new(),
        }
    }

    pub fn with_stage(mut self, stage: StageSnapshot) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn task_count(&self) -> usize {
        self.stages.iter().map(|stage| stage.tasks.len()).sum()
    }

    /// Derive the request status and progress, and log the outcome.
    pub fn calculate(&self, policy: &RollupPolicy) -> CalculatedStatus {
        let calculated = policy.rollup_request(&self.stages);
        crate::logging::log_rollup_operation(
            self.request_id,
            &self.cluster_name,
            self.stages.len(),
            self.task_count(),
            &calculated,
        );
        calculated
    }
}
