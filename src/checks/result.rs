use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Verdict of a single prerequisite check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    #[default]
    Pass,
    Warning,
    Fail,
}

impl CheckStatus {
    /// Whether the verdict lets the cluster operation start
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Warning => write!(f, "WARNING"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Kind of entity a check inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckType {
    Host,
    Service,
    Cluster,
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => write!(f, "HOST"),
            Self::Service => write!(f, "SERVICE"),
            Self::Cluster => write!(f, "CLUSTER"),
        }
    }
}

/// Result of one check run against one request.
///
/// Created by the orchestrator, populated by exactly one rule, then handed to
/// the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteCheck {
    pub id: String,
    pub description: String,
    pub check_type: CheckType,
    pub cluster_name: String,
    pub status: CheckStatus,
    pub fail_reason: Option<String>,
    /// Hosts or services the failure applies to
    pub failed_on: BTreeSet<String>,
}

impl PrerequisiteCheck {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        check_type: CheckType,
        cluster_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            check_type,
            cluster_name: cluster_name.into(),
            status: CheckStatus::Pass,
            fail_reason: None,
            failed_on: BTreeSet::new(),
        }
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.status = CheckStatus::Fail;
        self.fail_reason = Some(reason.into());
    }

    pub fn warn(&mut self, reason: impl Into<String>) {
        self.status = CheckStatus::Warning;
        self.fail_reason = Some(reason.into());
    }

    pub fn is_passed(&self) -> bool {
        self.status == CheckStatus::Pass
    }
}
