//! Error types for the cluster gate.

use crate::checks::{CheckError, CheckReport};
use crate::config::ConfigurationError;
use crate::inventory::InventoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Prerequisite check error: {0}")]
    Check(#[from] CheckError),

    /// Checks ran to completion and at least one of them blocks the operation.
    /// The full report is kept so every result and its `failed_on` set reach the operator.
    #[error("{}", blocked_message(.report))]
    Blocked { report: Box<CheckReport> },
}

fn blocked_message(report: &CheckReport) -> String {
    let failed: Vec<String> = report
        .failures()
        .map(|check| match &check.fail_reason {
            Some(reason) => format!("{} ({reason})", check.id),
            None => check.id.clone(),
        })
        .collect();
    format!(
        "Operation on cluster {} blocked by failed checks: {}",
        report.cluster_name,
        failed.join(", ")
    )
}

pub type Result<T> = std::result::Result<T, GateError>;
