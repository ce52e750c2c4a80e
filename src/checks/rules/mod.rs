//! Catalog of concrete prerequisite checks.
//!
//! Two shapes share the [`PrerequisiteCheckRule`](super::PrerequisiteCheckRule)
//! interface: set-producing rules that collect the offending hosts or services
//! into `failed_on`, and single boolean gates over a service's configuration.

pub mod distributed_cache;
pub mod hosts_heartbeat;
pub mod hosts_master_maintenance;
pub mod services_maintenance_mode;

pub use distributed_cache::{
    ServicesMapReduceDistributedCacheCheck, ServicesTezDistributedCacheCheck,
};
pub use hosts_heartbeat::HostsHeartbeatCheck;
pub use hosts_master_maintenance::HostsMasterMaintenanceCheck;
pub use services_maintenance_mode::ServicesMaintenanceModeCheck;
