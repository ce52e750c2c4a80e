use thiserror::Error;

/// Lookup failures raised by the external inventory and upgrade catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Cluster not found: {cluster_name}")]
    ClusterNotFound { cluster_name: String },

    #[error("Service not found: {service_name} in cluster {cluster_name}")]
    ServiceNotFound {
        cluster_name: String,
        service_name: String,
    },

    #[error("Configuration not found: {config_type} (tag {tag}) in cluster {cluster_name}")]
    ConfigNotFound {
        cluster_name: String,
        config_type: String,
        tag: String,
    },

    /// The inventory references data it cannot produce
    #[error("Inconsistent inventory for cluster {cluster_name}: {reason}")]
    Inconsistent { cluster_name: String, reason: String },
}

impl InventoryError {
    pub fn is_not_found(&self) -> bool {
        !matches!(self, Self::Inconsistent { .. })
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;

pub fn cluster_not_found(cluster_name: impl Into<String>) -> InventoryError {
    InventoryError::ClusterNotFound {
        cluster_name: cluster_name.into(),
    }
}
