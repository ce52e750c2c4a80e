//! Minimal rules for exercising orchestrator behaviour the built-in catalog never triggers.

#![allow(dead_code)]

use async_trait::async_trait;
use cluster_gate::checks::{
    CheckDescriptor, CheckType, PrereqCheckRequest, PrerequisiteCheck, PrerequisiteCheckRule,
    RuleResult,
};
use cluster_gate::inventory::InventoryError;

pub const LOOKUP_FAILURE_CHECK: &str = "TEST_LOOKUP_FAILURE";
pub const WARNING_CHECK: &str = "TEST_WARNING";

const LOOKUP_FAILURE_DESCRIPTOR: CheckDescriptor = CheckDescriptor {
    id: LOOKUP_FAILURE_CHECK,
    check_type: CheckType::Cluster,
    description: "Always fails its inventory lookup",
};

const WARNING_DESCRIPTOR: CheckDescriptor = CheckDescriptor {
    id: WARNING_CHECK,
    check_type: CheckType::Cluster,
    description: "Always reports a warning",
};

/// Applicable rule whose `perform` fails with an inventory error
pub struct LookupFailureRule;

#[async_trait]
impl PrerequisiteCheckRule for LookupFailureRule {
    fn descriptor(&self) -> &CheckDescriptor {
        &LOOKUP_FAILURE_DESCRIPTOR
    }

    async fn is_applicable(&self, _request: &PrereqCheckRequest) -> RuleResult<bool> {
        Ok(true)
    }

    async fn perform(
        &self,
        _check: &mut PrerequisiteCheck,
        request: &PrereqCheckRequest,
    ) -> RuleResult<()> {
        Err(InventoryError::Inconsistent {
            cluster_name: request.cluster_name.clone(),
            reason: "host table unavailable".to_string(),
        }
        .into())
    }
}

/// Applicable rule that always downgrades its result to a warning
pub struct WarningRule;

#[async_trait]
impl PrerequisiteCheckRule for WarningRule {
    fn descriptor(&self) -> &CheckDescriptor {
        &WARNING_DESCRIPTOR
    }

    async fn is_applicable(&self, _request: &PrereqCheckRequest) -> RuleResult<bool> {
        Ok(true)
    }

    async fn perform(
        &self,
        check: &mut PrerequisiteCheck,
        _request: &PrereqCheckRequest,
    ) -> RuleResult<()> {
        check.warn("Cluster has uncommitted configuration changes");
        Ok(())
    }
}
