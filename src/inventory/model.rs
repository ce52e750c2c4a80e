//! Cluster, host and service snapshots as handed out by a [`ClusterInventory`](super::ClusterInventory).

use super::error::{InventoryError, InventoryResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceState {
    On,
    #[default]
    Off,
}

/// Heartbeat-derived health of a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostHealth {
    #[default]
    Healthy,
    Alert,
    Unhealthy,
    /// Heartbeat lost
    Unknown,
}

impl HostHealth {
    pub fn is_heartbeat_lost(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

/// Stack name and version, e.g. `HDP-2.2`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StackId {
    pub stack_name: String,
    pub stack_version: String,
}

impl StackId {
    pub fn new(stack_name: impl Into<String>, stack_version: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            stack_version: stack_version.into(),
        }
    }
}

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.stack_name, self.stack_version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub host_name: String,
    pub health: HostHealth,
    /// Maintenance state per cluster id; absent means `Off`
    pub maintenance: BTreeMap<i64, MaintenanceState>,
}

impl Host {
    pub fn new(host_name: impl Into<String>) -> Self {
        Self {
            host_name: host_name.into(),
            health: HostHealth::default(),
            maintenance: BTreeMap::new(),
        }
    }

    pub fn with_maintenance(mut self, cluster_id: i64, state: MaintenanceState) -> Self {
        self.maintenance.insert(cluster_id, state);
        self
    }

    pub fn with_health(mut self, health: HostHealth) -> Self {
        self.health = health;
        self
    }

    pub fn maintenance_state(&self, cluster_id: i64) -> MaintenanceState {
        self.maintenance
            .get(&cluster_id)
            .copied()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceComponent {
    pub name: String,
    pub master: bool,
    /// Names of the hosts the component is installed on
    pub hosts: BTreeSet<String>,
}

impl ServiceComponent {
    pub fn master(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn slave(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    fn new(name: impl Into<String>, master: bool) -> Self {
        Self {
            name: name.into(),
            master,
            hosts: BTreeSet::new(),
        }
    }

    pub fn on_host(mut self, host_name: impl Into<String>) -> Self {
        self.hosts.insert(host_name.into());
        self
    }

    pub fn is_master_component(&self) -> bool {
        self.master
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub maintenance: MaintenanceState,
    pub components: BTreeMap<String, ServiceComponent>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            maintenance: MaintenanceState::Off,
            components: BTreeMap::new(),
        }
    }

    pub fn with_component(mut self, component: ServiceComponent) -> Self {
        self.components.insert(component.name.clone(), component);
        self
    }

    pub fn with_maintenance(mut self, state: MaintenanceState) -> Self {
        self.maintenance = state;
        self
    }
}

/// Tag of the configuration version currently desired for a config type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredConfig {
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub config_type: String,
    pub tag: String,
    pub properties: BTreeMap<String, String>,
}

impl Config {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub cluster_id: i64,
    pub cluster_name: String,
    pub desired_stack: StackId,
    pub services: BTreeMap<String, Service>,
    pub desired_configs: BTreeMap<String, DesiredConfig>,
    /// Every known config version, keyed by `(type, tag)`
    pub configs: BTreeMap<(String, String), Config>,
}

impl Cluster {
    pub fn new(cluster_id: i64, cluster_name: impl Into<String>, desired_stack: StackId) -> Self {
        Self {
            cluster_id,
            cluster_name: cluster_name.into(),
            desired_stack,
            services: BTreeMap::new(),
            desired_configs: BTreeMap::new(),
            configs: BTreeMap::new(),
        }
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.services.insert(service.name.clone(), service);
        self
    }

    /// Add a config version and make it the desired one for its type.
    pub fn with_desired_config<K, V, I>(mut self, config_type: &str, tag: &str, properties: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.set_desired_config(config_type, tag, properties);
        self
    }

    pub fn set_desired_config<K, V, I>(&mut self, config_type: &str, tag: &str, properties: I)
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let config = Config {
            config_type: config_type.to_string(),
            tag: tag.to_string(),
            properties: properties
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        };
        self.configs
            .insert((config_type.to_string(), tag.to_string()), config);
        self.desired_configs.insert(
            config_type.to_string(),
            DesiredConfig {
                tag: tag.to_string(),
            },
        );
    }

    pub fn service(&self, service_name: &str) -> InventoryResult<&Service> {
        self.services
            .get(service_name)
            .ok_or_else(|| InventoryError::ServiceNotFound {
                cluster_name: self.cluster_name.clone(),
                service_name: service_name.to_string(),
            })
    }

    pub fn config(&self, config_type: &str, tag: &str) -> InventoryResult<&Config> {
        self.configs
            .get(&(config_type.to_string(), tag.to_string()))
            .ok_or_else(|| InventoryError::ConfigNotFound {
                cluster_name: self.cluster_name.clone(),
                config_type: config_type.to_string(),
                tag: tag.to_string(),
            })
    }

    /// The config version currently desired for `config_type`.
    ///
    /// `ConfigNotFound` means no version is desired. A desired tag with no
    /// matching version is reported as `Inconsistent`.
    pub fn desired_config(&self, config_type: &str) -> InventoryResult<&Config> {
        let desired = self
            .desired_configs
            .get(config_type)
            .ok_or_else(|| InventoryError::ConfigNotFound {
                cluster_name: self.cluster_name.clone(),
                config_type: config_type.to_string(),
                tag: "<desired>".to_string(),
            })?;
        self.config(config_type, &desired.tag)
            .map_err(|_| InventoryError::Inconsistent {
                cluster_name: self.cluster_name.clone(),
                reason: format!(
                    "desired {config_type} version {} does not exist",
                    desired.tag
                ),
            })
    }
}
