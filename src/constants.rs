//! # System Constants
//!
//! Check codes, configuration property names and rollup weights shared across
//! the check catalog and the status engine.

/// Unique codes of the registered prerequisite checks
pub mod check_codes {
    pub const HOSTS_MASTER_MAINTENANCE: &str = "HOSTS_MASTER_MAINTENANCE";
    pub const HOSTS_HEARTBEAT: &str = "HOSTS_HEARTBEAT";
    pub const SERVICES_MAINTENANCE_MODE: &str = "SERVICES_MAINTENANCE_MODE";
    pub const SERVICES_TEZ_DISTRIBUTED_CACHE: &str = "SERVICES_TEZ_DISTRIBUTED_CACHE";
    pub const SERVICES_MR_DISTRIBUTED_CACHE: &str = "SERVICES_MR_DISTRIBUTED_CACHE";
}

/// Service names referenced by service-scoped checks
pub mod services {
    pub const TEZ: &str = "TEZ";
    pub const YARN: &str = "YARN";
    pub const MAPREDUCE2: &str = "MAPREDUCE2";
}

/// Configuration types and property keys read by config-gate checks
pub mod properties {
    pub const TEZ_SITE: &str = "tez-site";
    pub const TEZ_LIB_URIS: &str = "tez.lib.uris";
    pub const TEZ_USE_CLUSTER_HADOOP_LIBS: &str = "tez.use.cluster.hadoop-libs";

    pub const MAPRED_SITE: &str = "mapred-site";
    pub const MR_FRAMEWORK_PATH: &str = "mapreduce.application.framework.path";

    pub const CORE_SITE: &str = "core-site";
    pub const FS_DEFAULT_FS: &str = "fs.defaultFS";
}

/// Progress contribution of each status bucket
pub mod weights {
    pub const QUEUED: f64 = 0.09;
    /// In progress and every holding status
    pub const ACTIVE: f64 = 0.35;
    pub const COMPLETED: f64 = 1.0;
}

/// Configuration file names searched in the config directory
pub const CONFIG_FILE_NAMES: &[&str] = &["cluster-gate.yaml", "cluster-gate.yml"];

/// Environment sections recognised in the configuration file
pub const ENVIRONMENTS: &[&str] = &["development", "test", "production"];
