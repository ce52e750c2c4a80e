use crate::checks::error::RuleResult;
use crate::checks::request::PrereqCheckRequest;
use crate::checks::result::{CheckType, PrerequisiteCheck};
use crate::checks::rule::{format_entity_list, CheckDescriptor, PrerequisiteCheckRule};
use crate::constants::check_codes;
use crate::inventory::{ClusterInventory, MaintenanceState};
use async_trait::async_trait;
use std::sync::Arc;

const DESCRIPTOR: CheckDescriptor = CheckDescriptor {
    id: check_codes::HOSTS_HEARTBEAT,
    check_type: CheckType::Host,
    description: "All hosts must be heartbeating with the server unless they are in Maintenance Mode",
};

/// Fails when a host outside maintenance mode has lost its heartbeat.
pub struct HostsHeartbeatCheck {
    inventory: Arc<dyn ClusterInventory>,
}

impl HostsHeartbeatCheck {
    pub fn new(inventory: Arc<dyn ClusterInventory>) -> Self {
        Self { inventory }
    }
}

#[async_trait]
impl PrerequisiteCheckRule for HostsHeartbeatCheck {
    fn descriptor(&self) -> &CheckDescriptor {
        &DESCRIPTOR
    }

    async fn is_applicable(&self, _request: &PrereqCheckRequest) -> RuleResult<bool> {
        Ok(true)
    }

    async fn perform(
        &self,
        check: &mut PrerequisiteCheck,
        request: &PrereqCheckRequest,
    ) -> RuleResult<()> {
        let cluster = self.inventory.get_cluster(&request.cluster_name).await?;
        let hosts = self
            .inventory
            .get_hosts_for_cluster(&request.cluster_name)
            .await?;

        check.failed_on.extend(
            hosts
                .values()
                .filter(|host| {
                    host.health.is_heartbeat_lost()
                        && host.maintenance_state(cluster.cluster_id) == MaintenanceState::Off
                })
                .map(|host| host.host_name.clone()),
        );

        if !check.failed_on.is_empty() {
            check.fail(format!(
                "{} must be heartbeating with the server unless in Maintenance Mode",
                format_entity_list(&check.failed_on)
            ));
        }

        Ok(())
    }
}
