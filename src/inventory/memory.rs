//! In-memory inventory and upgrade catalog, for tests and embedding callers
//! that already hold a snapshot of their cluster state.

use super::error::{cluster_not_found, InventoryResult};
use super::model::{Cluster, Host, StackId};
use super::upgrade::UpgradePack;
use super::{ClusterInventory, UpgradeCatalog};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
pub struct InMemoryInventory {
    clusters: RwLock<BTreeMap<String, Arc<Cluster>>>,
    hosts: RwLock<BTreeMap<String, BTreeMap<String, Host>>>,
    upgrade_packs: RwLock<BTreeMap<StackId, BTreeMap<String, UpgradePack>>>,
    /// `(stack, target version) -> pack name`
    package_names: RwLock<BTreeMap<(StackId, String), String>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_cluster(&self, cluster: Cluster) {
        debug!(cluster_name = %cluster.cluster_name, "Adding cluster to in-memory inventory");
        self.hosts
            .write()
            .entry(cluster.cluster_name.clone())
            .or_default();
        self.clusters
            .write()
            .insert(cluster.cluster_name.clone(), Arc::new(cluster));
    }

    /// Apply `update` to a copy of the cluster and publish the copy.
    /// Snapshots handed out earlier are left untouched.
    pub fn update_cluster<F>(&self, cluster_name: &str, update: F) -> InventoryResult<()>
    where
        F: FnOnce(&mut Cluster),
    {
        let mut clusters = self.clusters.write();
        let current = clusters
            .get(cluster_name)
            .ok_or_else(|| cluster_not_found(cluster_name))?;
        let mut updated = Cluster::clone(current);
        update(&mut updated);
        clusters.insert(cluster_name.to_string(), Arc::new(updated));
        Ok(())
    }

    pub fn add_host(&self, cluster_name: &str, host: Host) -> InventoryResult<()> {
        if !self.clusters.read().contains_key(cluster_name) {
            return Err(cluster_not_found(cluster_name));
        }
        self.hosts
            .write()
            .entry(cluster_name.to_string())
            .or_default()
            .insert(host.host_name.clone(), host);
        Ok(())
    }

    pub fn add_upgrade_pack(&self, stack: StackId, pack: UpgradePack) {
        self.upgrade_packs
            .write()
            .entry(stack)
            .or_default()
            .insert(pack.name.clone(), pack);
    }

    /// Declare which pack name resolves for `stack -> target_version`.
    pub fn map_upgrade_package(&self, stack: StackId, target_version: &str, pack_name: &str) {
        self.package_names
            .write()
            .insert((stack, target_version.to_string()), pack_name.to_string());
    }
}

#[async_trait]
impl ClusterInventory for InMemoryInventory {
    async fn get_cluster(&self, cluster_name: &str) -> InventoryResult<Arc<Cluster>> {
        self.clusters
            .read()
            .get(cluster_name)
            .cloned()
            .ok_or_else(|| cluster_not_found(cluster_name))
    }

    async fn get_hosts_for_cluster(
        &self,
        cluster_name: &str,
    ) -> InventoryResult<BTreeMap<String, Host>> {
        self.hosts
            .read()
            .get(cluster_name)
            .cloned()
            .ok_or_else(|| cluster_not_found(cluster_name))
    }
}

#[async_trait]
impl UpgradeCatalog for InMemoryInventory {
    async fn resolve_upgrade_package_name(
        &self,
        stack: &StackId,
        target_version: &str,
    ) -> InventoryResult<Option<String>> {
        Ok(self
            .package_names
            .read()
            .get(&(stack.clone(), target_version.to_string()))
            .cloned())
    }

    async fn get_upgrade_packs(
        &self,
        stack: &StackId,
    ) -> InventoryResult<BTreeMap<String, UpgradePack>> {
        Ok(self
            .upgrade_packs
            .read()
            .get(stack)
            .cloned()
            .unwrap_or_default())
    }
}
