//! Config-gate rules: a service must load its libraries from the distributed
//! file system rather than from locally staged copies.

use crate::checks::error::RuleResult;
use crate::checks::request::PrereqCheckRequest;
use crate::checks::result::{CheckType, PrerequisiteCheck};
use crate::checks::rule::{CheckDescriptor, PrerequisiteCheckRule};
use crate::constants::{check_codes, properties, services};
use crate::inventory::{Cluster, ClusterInventory, InventoryError};
use async_trait::async_trait;
use std::sync::Arc;

/// Whether `value` is a URI on a distributed file system (`hdfs:`, `wasb`-style `*dfs:` schemes).
pub fn is_distributed_path(value: &str) -> bool {
    value
        .split_once(':')
        .is_some_and(|(scheme, _)| scheme.ends_with("dfs"))
}

/// Resolve whether any of `service_names` is installed. Unknown services mean
/// "not applicable"; an unknown cluster is propagated.
async fn has_any_service(
    inventory: &dyn ClusterInventory,
    cluster_name: &str,
    service_names: &[&str],
) -> RuleResult<bool> {
    let cluster = inventory.get_cluster(cluster_name).await?;
    for name in service_names {
        match cluster.service(name) {
            Ok(_) => return Ok(true),
            Err(InventoryError::ServiceNotFound { .. }) => continue,
            Err(other) => return Err(other.into()),
        }
    }
    Ok(false)
}

/// Value of `key` in the desired config of `config_type`. A config type with
/// no desired version reads as unset; any other lookup failure is propagated.
fn desired_property<'a>(
    cluster: &'a Cluster,
    config_type: &str,
    key: &str,
) -> RuleResult<Option<&'a str>> {
    match cluster.desired_config(config_type) {
        Ok(config) => Ok(config.property(key)),
        Err(InventoryError::ConfigNotFound { .. }) => Ok(None),
        Err(other) => Err(other.into()),
    }
}

const TEZ_DESCRIPTOR: CheckDescriptor = CheckDescriptor {
    id: check_codes::SERVICES_TEZ_DISTRIBUTED_CACHE,
    check_type: CheckType::Service,
    description: "TEZ should load its libraries from the distributed cache",
};

/// Tez must reference a `tar.gz` archive on a distributed file system and must
/// not fall back to the cluster's Hadoop libraries.
pub struct ServicesTezDistributedCacheCheck {
    inventory: Arc<dyn ClusterInventory>,
}

impl ServicesTezDistributedCacheCheck {
    pub fn new(inventory: Arc<dyn ClusterInventory>) -> Self {
        Self { inventory }
    }
}

#[async_trait]
impl PrerequisiteCheckRule for ServicesTezDistributedCacheCheck {
    fn descriptor(&self) -> &CheckDescriptor {
        &TEZ_DESCRIPTOR
    }

    async fn is_applicable(&self, request: &PrereqCheckRequest) -> RuleResult<bool> {
        has_any_service(
            self.inventory.as_ref(),
            &request.cluster_name,
            &[services::TEZ],
        )
        .await
    }

    async fn perform(
        &self,
        check: &mut PrerequisiteCheck,
        request: &PrereqCheckRequest,
    ) -> RuleResult<()> {
        let cluster = self.inventory.get_cluster(&request.cluster_name).await?;

        let lib_uris = desired_property(&cluster, properties::TEZ_SITE, properties::TEZ_LIB_URIS)?;
        let use_hadoop_libs = desired_property(
            &cluster,
            properties::TEZ_SITE,
            properties::TEZ_USE_CLUSTER_HADOOP_LIBS,
        )?
        .map(|value| value.trim().eq_ignore_ascii_case("true"));

        match (lib_uris, use_hadoop_libs) {
            (Some(uris), _) if !is_distributed_path(uris) || !uris.ends_with(".tar.gz") => {
                check.fail(format!(
                    "{}/{} must point to a .tar.gz archive on the distributed file system, found {}",
                    properties::TEZ_SITE,
                    properties::TEZ_LIB_URIS,
                    uris
                ));
            }
            (None, _) => {
                check.fail(format!(
                    "{}/{} must be set to a .tar.gz archive on the distributed file system",
                    properties::TEZ_SITE,
                    properties::TEZ_LIB_URIS
                ));
            }
            (Some(_), Some(false)) => {}
            (Some(_), _) => {
                check.fail(format!(
                    "{}/{} must be set to false",
                    properties::TEZ_SITE,
                    properties::TEZ_USE_CLUSTER_HADOOP_LIBS
                ));
            }
        }

        Ok(())
    }
}

const MR_DESCRIPTOR: CheckDescriptor = CheckDescriptor {
    id: check_codes::SERVICES_MR_DISTRIBUTED_CACHE,
    check_type: CheckType::Service,
    description: "MapReduce should load its libraries from the distributed cache",
};

/// MapReduce must take its framework from a distributed file system, either
/// through an absolute `*dfs:` framework path or through a relative path on a
/// distributed default file system.
pub struct ServicesMapReduceDistributedCacheCheck {
    inventory: Arc<dyn ClusterInventory>,
}

impl ServicesMapReduceDistributedCacheCheck {
    pub fn new(inventory: Arc<dyn ClusterInventory>) -> Self {
        Self { inventory }
    }
}

#[async_trait]
impl PrerequisiteCheckRule for ServicesMapReduceDistributedCacheCheck {
    fn descriptor(&self) -> &CheckDescriptor {
        &MR_DESCRIPTOR
    }

    async fn is_applicable(&self, request: &PrereqCheckRequest) -> RuleResult<bool> {
        has_any_service(
            self.inventory.as_ref(),
            &request.cluster_name,
            &[services::YARN, services::MAPREDUCE2],
        )
        .await
    }

    async fn perform(
        &self,
        check: &mut PrerequisiteCheck,
        request: &PrereqCheckRequest,
    ) -> RuleResult<()> {
        let cluster = self.inventory.get_cluster(&request.cluster_name).await?;

        let framework_path = desired_property(
            &cluster,
            properties::MAPRED_SITE,
            properties::MR_FRAMEWORK_PATH,
        )?;
        let default_fs = desired_property(
            &cluster,
            properties::CORE_SITE,
            properties::FS_DEFAULT_FS,
        )?;

        let distributed = match framework_path {
            Some(path) if is_distributed_path(path) => true,
            Some(_) => default_fs.is_some_and(is_distributed_path),
            None => false,
        };

        if !distributed {
            check.fail(format!(
                "{}/{} must reference the distributed file system, directly or through {}/{}",
                properties::MAPRED_SITE,
                properties::MR_FRAMEWORK_PATH,
                properties::CORE_SITE,
                properties::FS_DEFAULT_FS
            ));
        }

        Ok(())
    }
}
