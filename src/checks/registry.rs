//! # Check Registry
//!
//! Explicit, constructed set of prerequisite checks handed to the
//! [`CheckOrchestrator`](super::CheckOrchestrator). Registration order is the
//! order results are reported in.
//!
//! ```rust
//! use cluster_gate::checks::CheckRegistry;
//! use cluster_gate::inventory::InMemoryInventory;
//! use std::sync::Arc;
//!
//! let inventory = Arc::new(InMemoryInventory::new());
//! let registry = CheckRegistry::with_default_checks(inventory.clone(), inventory);
//! assert_eq!(registry.len(), 5);
//!
//! let subset = registry.without("HOSTS_HEARTBEAT");
//! assert_eq!(subset.len(), 4);
//! ```

use super::error::{CheckError, RuleResult};
use super::rule::PrerequisiteCheckRule;
use super::rules::{
    HostsHeartbeatCheck, HostsMasterMaintenanceCheck, ServicesMaintenanceModeCheck,
    ServicesMapReduceDistributedCacheCheck, ServicesTezDistributedCacheCheck,
};
use crate::inventory::{ClusterInventory, UpgradeCatalog};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone, Default)]
pub struct CheckRegistry {
    rules: Vec<Arc<dyn PrerequisiteCheckRule>>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the full built-in catalog.
    pub fn with_default_checks(
        inventory: Arc<dyn ClusterInventory>,
        catalog: Arc<dyn UpgradeCatalog>,
    ) -> Self {
        let rules: Vec<Arc<dyn PrerequisiteCheckRule>> = vec![
            Arc::new(HostsHeartbeatCheck::new(inventory.clone())),
            Arc::new(HostsMasterMaintenanceCheck::new(inventory.clone(), catalog)),
            Arc::new(ServicesMaintenanceModeCheck::new(inventory.clone())),
            Arc::new(ServicesMapReduceDistributedCacheCheck::new(inventory.clone())),
            Arc::new(ServicesTezDistributedCacheCheck::new(inventory)),
        ];

        info!(checks = rules.len(), "Created CheckRegistry with default checks");

        Self { rules }
    }

    /// Register a rule. Codes must be unique.
    pub fn register(&mut self, rule: Arc<dyn PrerequisiteCheckRule>) -> RuleResult<&mut Self> {
        let id = rule.descriptor().id;
        if self.contains(id) {
            return Err(CheckError::DuplicateRule {
                check: id.to_string(),
            });
        }

        debug!(check = id, "Registering prerequisite check");
        self.rules.push(rule);
        Ok(self)
    }

    /// Copy of this registry without the rule identified by `code`.
    pub fn without(&self, code: &str) -> Self {
        Self {
            rules: self
                .rules
                .iter()
                .filter(|rule| rule.descriptor().id != code)
                .cloned()
                .collect(),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.rules.iter().any(|rule| rule.descriptor().id == code)
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.descriptor().id).collect()
    }

    pub fn rules(&self) -> &[Arc<dyn PrerequisiteCheckRule>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("codes", &self.codes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::check_codes;
    use crate::inventory::InMemoryInventory;

    fn default_registry() -> CheckRegistry {
        let inventory = Arc::new(InMemoryInventory::new());
        CheckRegistry::with_default_checks(inventory.clone(), inventory)
    }

    #[test]
    fn test_default_catalog_codes() {
        let registry = default_registry();
        assert_eq!(
            registry.codes(),
            vec![
                check_codes::HOSTS_HEARTBEAT,
                check_codes::HOSTS_MASTER_MAINTENANCE,
                check_codes::SERVICES_MAINTENANCE_MODE,
                check_codes::SERVICES_MR_DISTRIBUTED_CACHE,
                check_codes::SERVICES_TEZ_DISTRIBUTED_CACHE,
            ]
        );
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let inventory = Arc::new(InMemoryInventory::new());
        let mut registry = CheckRegistry::new();
        registry
            .register(Arc::new(HostsHeartbeatCheck::new(inventory.clone())))
            .unwrap();

        let err = registry
            .register(Arc::new(HostsHeartbeatCheck::new(inventory)))
            .unwrap_err();
        assert_eq!(
            err,
            CheckError::DuplicateRule {
                check: check_codes::HOSTS_HEARTBEAT.to_string()
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_without_leaves_original_untouched() {
        let registry = default_registry();
        let subset = registry.without(check_codes::SERVICES_TEZ_DISTRIBUTED_CACHE);
        assert_eq!(subset.len(), 4);
        assert!(!subset.contains(check_codes::SERVICES_TEZ_DISTRIBUTED_CACHE));
        assert!(registry.contains(check_codes::SERVICES_TEZ_DISTRIBUTED_CACHE));
    }
}
