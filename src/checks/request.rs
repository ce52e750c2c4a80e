use serde::{Deserialize, Serialize};

/// Request to validate a cluster before an operation starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrereqCheckRequest {
    pub cluster_name: String,
    /// Version the cluster would be upgraded to, when the operation is an upgrade
    pub repository_version: Option<String>,
}

impl PrereqCheckRequest {
    pub fn new(cluster_name: impl Into<String>) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            repository_version: None,
        }
    }

    pub fn with_repository_version(mut self, version: impl Into<String>) -> Self {
        self.repository_version = Some(version.into());
        self
    }
}
