//! Test data builders for inventory fixtures and stage snapshots.

#![allow(dead_code)]

use cluster_gate::inventory::{
    Cluster, Host, HostHealth, InMemoryInventory, MaintenanceState, ProcessingComponent, Service,
    ServiceComponent, StackId, UpgradePack,
};
use cluster_gate::models::{StageSnapshot, TaskSnapshot};
use cluster_gate::status::OperationStatus;
use std::sync::Arc;

pub const CLUSTER_NAME: &str = "cluster";
pub const CLUSTER_ID: i64 = 1;
pub const TARGET_VERSION: &str = "2.2.1.0";
pub const UPGRADE_PACK: &str = "upgrade_test";

pub fn stack() -> StackId {
    StackId::new("HDP", "2.2")
}

/// Builder for an in-memory cluster with hosts and an upgrade catalog
pub struct ClusterFixtureBuilder {
    cluster: Cluster,
    hosts: Vec<Host>,
    packs: Vec<UpgradePack>,
    package_mapping: Option<(String, String)>,
}

impl ClusterFixtureBuilder {
    pub fn new() -> Self {
        Self {
            cluster: Cluster::new(CLUSTER_ID, CLUSTER_NAME, stack()),
            hosts: Vec::new(),
            packs: Vec::new(),
            package_mapping: None,
        }
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.cluster = self.cluster.with_service(service);
        self
    }

    pub fn with_host(mut self, host_name: &str) -> Self {
        self.hosts.push(Host::new(host_name));
        self
    }

    pub fn with_host_in_maintenance(mut self, host_name: &str) -> Self {
        self.hosts
            .push(Host::new(host_name).with_maintenance(CLUSTER_ID, MaintenanceState::On));
        self
    }

    pub fn with_lost_host(mut self, host_name: &str) -> Self {
        self.hosts
            .push(Host::new(host_name).with_health(HostHealth::Unknown));
        self
    }

    pub fn with_desired_config(mut self, config_type: &str, properties: &[(&str, &str)]) -> Self {
        self.cluster
            .set_desired_config(config_type, "version1", properties.iter().copied());
        self
    }

    pub fn with_upgrade_pack(mut self, pack: UpgradePack) -> Self {
        self.packs.push(pack);
        self
    }

    /// Resolve `TARGET_VERSION` to `pack_name`
    pub fn resolving_to(mut self, pack_name: &str) -> Self {
        self.package_mapping = Some((TARGET_VERSION.to_string(), pack_name.to_string()));
        self
    }

    pub fn build(self) -> Arc<InMemoryInventory> {
        let inventory = InMemoryInventory::new();
        inventory.add_cluster(self.cluster);
        for host in self.hosts {
            inventory
                .add_host(CLUSTER_NAME, host)
                .expect("Failed to add test host");
        }
        for pack in self.packs {
            inventory.add_upgrade_pack(stack(), pack);
        }
        if let Some((version, pack_name)) = self.package_mapping {
            inventory.map_upgrade_package(stack(), &version, &pack_name);
        }
        Arc::new(inventory)
    }
}

/// HDFS with a NameNode on h1 and DataNodes on h1 and h2
pub fn hdfs_service() -> Service {
    Service::new("HDFS")
        .with_component(ServiceComponent::master("NAMENODE").on_host("h1"))
        .with_component(
            ServiceComponent::slave("DATANODE")
                .on_host("h1")
                .on_host("h2"),
        )
}

/// Upgrade pack touching the HDFS NameNode
pub fn namenode_upgrade_pack() -> UpgradePack {
    UpgradePack::new(UPGRADE_PACK, "2.2.*")
        .with_component("HDFS", ProcessingComponent::new("NAMENODE"))
}

/// Host h1 in maintenance with a NameNode the upgrade touches
pub fn master_in_maintenance_cluster() -> Arc<InMemoryInventory> {
    ClusterFixtureBuilder::new()
        .with_service(hdfs_service())
        .with_host_in_maintenance("h1")
        .with_host("h2")
        .with_upgrade_pack(namenode_upgrade_pack())
        .resolving_to(UPGRADE_PACK)
        .build()
}

/// A stage of tasks with the given statuses, one per host
pub fn stage(stage_id: i64, skippable: bool, statuses: &[OperationStatus]) -> StageSnapshot {
    statuses
        .iter()
        .enumerate()
        .fold(
            StageSnapshot::new(stage_id, format!("stage {stage_id}"), skippable),
            |stage, (index, status)| {
                stage.with_task(TaskSnapshot::new(
                    stage_id * 100 + index as i64,
                    format!("h{index}"),
                    "COMPONENT",
                    *status,
                ))
            },
        )
}
