use crate::checks::error::{evaluation_error, RuleResult};
use crate::checks::request::PrereqCheckRequest;
use crate::checks::result::{CheckType, PrerequisiteCheck};
use crate::checks::rule::{format_entity_list, CheckDescriptor, PrerequisiteCheckRule};
use crate::constants::check_codes;
use crate::inventory::{ClusterInventory, MaintenanceState, UpgradeCatalog};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

const DESCRIPTOR: CheckDescriptor = CheckDescriptor {
    id: check_codes::HOSTS_MASTER_MAINTENANCE,
    check_type: CheckType::Host,
    description: "Hosts in Maintenance Mode must not have any master components",
};

/// Fails when a host in maintenance mode runs a master component the upgrade
/// plan for the requested version will touch.
pub struct HostsMasterMaintenanceCheck {
    inventory: Arc<dyn ClusterInventory>,
    catalog: Arc<dyn UpgradeCatalog>,
}

impl HostsMasterMaintenanceCheck {
    pub fn new(inventory: Arc<dyn ClusterInventory>, catalog: Arc<dyn UpgradeCatalog>) -> Self {
        Self { inventory, catalog }
    }
}

#[async_trait]
impl PrerequisiteCheckRule for HostsMasterMaintenanceCheck {
    fn descriptor(&self) -> &CheckDescriptor {
        &DESCRIPTOR
    }

    async fn is_applicable(&self, request: &PrereqCheckRequest) -> RuleResult<bool> {
        Ok(request.repository_version.is_some())
    }

    async fn perform(
        &self,
        check: &mut PrerequisiteCheck,
        request: &PrereqCheckRequest,
    ) -> RuleResult<()> {
        let target_version = request
            .repository_version
            .as_deref()
            .ok_or_else(|| evaluation_error(DESCRIPTOR.id, "no target version in request"))?;

        let cluster = self.inventory.get_cluster(&request.cluster_name).await?;
        let stack = &cluster.desired_stack;

        let Some(pack_name) = self
            .catalog
            .resolve_upgrade_package_name(stack, target_version)
            .await?
        else {
            check.fail(format!(
                "Could not find suitable upgrade pack for {stack} to version {target_version}"
            ));
            return Ok(());
        };

        let packs = self.catalog.get_upgrade_packs(stack).await?;
        let Some(pack) = packs.get(&pack_name) else {
            check.fail(format!("Could not find upgrade pack named {pack_name}"));
            return Ok(());
        };

        let upgraded_components = pack.component_names();
        let hosts_with_master: BTreeSet<&str> = cluster
            .services
            .values()
            .flat_map(|service| service.components.values())
            .filter(|component| {
                component.is_master_component()
                    && upgraded_components.contains(component.name.as_str())
            })
            .flat_map(|component| component.hosts.iter().map(String::as_str))
            .collect();

        debug!(
            cluster = %cluster.cluster_name,
            upgrade_pack = %pack_name,
            master_hosts = hosts_with_master.len(),
            "Resolved hosts with upgraded master components"
        );

        let hosts = self
            .inventory
            .get_hosts_for_cluster(&request.cluster_name)
            .await?;
        for host in hosts.values() {
            if host.maintenance_state(cluster.cluster_id) == MaintenanceState::On
                && hosts_with_master.contains(host.host_name.as_str())
            {
                check.failed_on.insert(host.host_name.clone());
            }
        }

        if !check.failed_on.is_empty() {
            let hosts = format_entity_list(&check.failed_on);
            check.fail(format!(
                "{hosts} must not be in Maintenance Mode as they have master components installed"
            ));
        }

        Ok(())
    }
}
