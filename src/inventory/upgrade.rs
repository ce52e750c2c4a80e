//! Upgrade pack definitions as resolved by an [`UpgradeCatalog`](super::UpgradeCatalog).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Work an upgrade plan performs for one component
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessingComponent {
    pub name: String,
    #[serde(default)]
    pub pre_tasks: Vec<String>,
    #[serde(default)]
    pub post_tasks: Vec<String>,
}

impl ProcessingComponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// An upgrade plan from one stack version to a target version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradePack {
    pub name: String,
    pub target: String,
    /// Components touched by the plan, keyed by stage (usually service name)
    pub tasks: BTreeMap<String, BTreeMap<String, ProcessingComponent>>,
}

impl UpgradePack {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            tasks: BTreeMap::new(),
        }
    }

    pub fn with_component(mut self, stage_key: &str, component: ProcessingComponent) -> Self {
        self.tasks
            .entry(stage_key.to_string())
            .or_default()
            .insert(component.name.clone(), component);
        self
    }

    /// Names of every component the plan touches, across all stages.
    pub fn component_names(&self) -> BTreeSet<&str> {
        self.tasks
            .values()
            .flat_map(|components| components.keys().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_names_span_stages() {
        let pack = UpgradePack::new("upgrade_test", "2.2.*")
            .with_component("HDFS", ProcessingComponent::new("NAMENODE"))
            .with_component("HDFS", ProcessingComponent::new("DATANODE"))
            .with_component("ZOOKEEPER", ProcessingComponent::new("ZOOKEEPER_SERVER"));

        let names: Vec<&str> = pack.component_names().into_iter().collect();
        assert_eq!(names, vec!["DATANODE", "NAMENODE", "ZOOKEEPER_SERVER"]);
    }
}
