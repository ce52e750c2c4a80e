//! # External Inventory Interfaces
//!
//! Lookups the prerequisite checks borrow for the duration of one evaluation:
//! cluster, host and service inventory, desired configuration, and upgrade
//! pack definitions. The storage behind them is owned elsewhere; this crate
//! only reads through these traits.

pub mod error;
pub mod memory;
pub mod model;
pub mod upgrade;

pub use error::{InventoryError, InventoryResult};
pub use memory::InMemoryInventory;
pub use model::{
    Cluster, Config, DesiredConfig, Host, HostHealth, MaintenanceState, Service,
    ServiceComponent, StackId,
};
pub use upgrade::{ProcessingComponent, UpgradePack};

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Cluster and host inventory lookup
#[async_trait]
pub trait ClusterInventory: Send + Sync {
    /// Fails with [`InventoryError::ClusterNotFound`] for an unknown cluster.
    async fn get_cluster(&self, cluster_name: &str) -> InventoryResult<Arc<Cluster>>;

    /// Hosts of the cluster keyed by host name.
    async fn get_hosts_for_cluster(&self, cluster_name: &str)
        -> InventoryResult<BTreeMap<String, Host>>;
}

/// Upgrade definition lookup
#[async_trait]
pub trait UpgradeCatalog: Send + Sync {
    /// Name of the upgrade pack that moves `stack` to `target_version`, if any.
    async fn resolve_upgrade_package_name(
        &self,
        stack: &StackId,
        target_version: &str,
    ) -> InventoryResult<Option<String>>;

    /// Every upgrade pack defined for `stack`, keyed by pack name.
    async fn get_upgrade_packs(&self, stack: &StackId)
        -> InventoryResult<BTreeMap<String, UpgradePack>>;
}
