#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Cluster Gate
//!
//! Decision and aggregation logic for cluster-wide operations such as
//! rolling upgrades.
//!
//! ## Overview
//!
//! Two engines make up the crate:
//!
//! - **Prerequisite checks** decide whether an operation may start. A
//!   [`CheckRegistry`](checks::CheckRegistry) of independent rules is run by the
//!   [`CheckOrchestrator`](checks::CheckOrchestrator) against a
//!   [`PrereqCheckRequest`](checks::PrereqCheckRequest); any `FAIL` blocks the
//!   operation and every result is surfaced with its reason.
//! - **Status rollup** derives the status and percent complete of a running
//!   operation from the statuses of its tasks, grouped into stages, using a
//!   fixed priority order and progress weights.
//!
//! ## Module Organization
//!
//! - [`status`] - closed status model and the pure rollup engine
//! - [`models`] - task, stage and request snapshots the rollup reads
//! - [`checks`] - rule trait, catalog, registry and orchestrator
//! - [`inventory`] - cluster, host, configuration and upgrade-pack lookups
//! - [`config`] - YAML configuration with environment overrides
//! - [`error`] - crate error types
//! - [`logging`] - structured logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use cluster_gate::models::{StageSnapshot, TaskSnapshot};
//! use cluster_gate::status::{CalculatedStatus, OperationStatus};
//!
//! let stages = vec![
//!     StageSnapshot::new(1, "Restart ZooKeeper", false)
//!         .with_task(TaskSnapshot::new(1, "h1", "ZOOKEEPER_SERVER", OperationStatus::Completed))
//!         .with_task(TaskSnapshot::new(2, "h2", "ZOOKEEPER_SERVER", OperationStatus::InProgress)),
//! ];
//!
//! let calculated = CalculatedStatus::from_stages(&stages);
//! assert_eq!(calculated.status, OperationStatus::InProgress);
//! assert!((calculated.percent - 67.5).abs() < 1e-9);
//! ```

pub mod checks;
pub mod config;
pub mod constants;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod models;
pub mod status;

pub use checks::{
    CheckOrchestrator, CheckRegistry, CheckReport, CheckStatus, PrereqCheckRequest,
    PrerequisiteCheck,
};
pub use config::{ConfigManager, GateConfig};
pub use error::{GateError, Result};
pub use status::{CalculatedStatus, OperationStatus, RollupPolicy};

/// Run `orchestrator` against `request` and turn a blocking report into
/// [`GateError::Blocked`], which carries the full report. The report is
/// returned directly when the operation may start.
pub async fn admit(
    orchestrator: &CheckOrchestrator,
    request: &PrereqCheckRequest,
) -> Result<CheckReport> {
    let report = orchestrator.run_checks(request).await?;
    if report.is_permitted() {
        return Ok(report);
    }

    Err(GateError::Blocked {
        report: Box::new(report),
    })
}
