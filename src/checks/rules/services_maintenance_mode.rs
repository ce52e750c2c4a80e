use crate::checks::error::RuleResult;
use crate::checks::request::PrereqCheckRequest;
use crate::checks::result::{CheckType, PrerequisiteCheck};
use crate::checks::rule::{format_entity_list, CheckDescriptor, PrerequisiteCheckRule};
use crate::constants::check_codes;
use crate::inventory::{ClusterInventory, MaintenanceState};
use async_trait::async_trait;
use std::sync::Arc;

const DESCRIPTOR: CheckDescriptor = CheckDescriptor {
    id: check_codes::SERVICES_MAINTENANCE_MODE,
    check_type: CheckType::Service,
    description: "No services can be in Maintenance Mode",
};

pub struct ServicesMaintenanceModeCheck {
    inventory: Arc<dyn ClusterInventory>,
}

impl ServicesMaintenanceModeCheck {
    pub fn new(inventory: Arc<dyn ClusterInventory>) -> Self {
        Self { inventory }
    }
}

#[async_trait]
impl PrerequisiteCheckRule for ServicesMaintenanceModeCheck {
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

        check.failed_on.extend(
            cluster
                .services
                .values()
                .filter(|service| service.maintenance == MaintenanceState::On)
                .map(|service| service.name.clone()),
        );

        if !check.failed_on.is_empty() {
            check.fail(format!(
                "{} must not be in Maintenance Mode",
                format_entity_list(&check.failed_on)
            ));
        }

        Ok(())
    }
}
