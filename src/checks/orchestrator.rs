//! # Check Orchestrator
//!
//! Runs the applicable subset of a [`CheckRegistry`] against one request and
//! returns a [`CheckReport`] the caller consults before creating the cluster
//! operation.
//!
//! Checks fan out concurrently (each future owns its own result, there is no
//! shared result buffer) and fan back in in registry order. A check that
//! cannot determine its applicability aborts the whole run; no partial report
//! is ever returned.

use super::error::{CheckError, RuleResult};
use super::registry::CheckRegistry;
use super::request::PrereqCheckRequest;
use super::result::{CheckStatus, PrerequisiteCheck};
use super::rule::PrerequisiteCheckRule;
use crate::config::ChecksConfig;
use crate::logging::log_check_operation;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Outcome of one orchestrator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Identifies the run in logs only
    pub correlation_id: Uuid,
    pub cluster_name: String,
    pub evaluated_at: DateTime<Utc>,
    /// One entry per applicable check, in registry order
    pub results: Vec<PrerequisiteCheck>,
}

impl CheckReport {
    /// The operation may start only if no check failed.
    pub fn is_permitted(&self) -> bool {
        !self.results.iter().any(|check| check.status.is_blocking())
    }

    /// Worst status across all results; `PASS` when nothing ran.
    pub fn aggregate_status(&self) -> CheckStatus {
        self.results
            .iter()
            .map(|check| check.status)
            .max()
            .unwrap_or_default()
    }

    pub fn failures(&self) -> impl Iterator<Item = &PrerequisiteCheck> {
        self.results
            .iter()
            .filter(|check| check.status == CheckStatus::Fail)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &PrerequisiteCheck> {
        self.results
            .iter()
            .filter(|check| check.status == CheckStatus::Warning)
    }

    pub fn result(&self, id: &str) -> Option<&PrerequisiteCheck> {
        self.results.iter().find(|check| check.id == id)
    }
}

pub struct CheckOrchestrator {
    registry: CheckRegistry,
    config: ChecksConfig,
}

impl CheckOrchestrator {
    pub fn new(registry: CheckRegistry, config: ChecksConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    /// Evaluate every enabled, applicable check against `request`.
    pub async fn run_checks(&self, request: &PrereqCheckRequest) -> RuleResult<CheckReport> {
        let correlation_id = Uuid::new_v4();
        let rules: Vec<&dyn PrerequisiteCheckRule> = self
            .registry
            .rules()
            .iter()
            .map(|rule| &**rule)
            .filter(|rule| !self.config.is_disabled(rule.descriptor().id))
            .collect();

        info!(
            correlation_id = %correlation_id,
            cluster = %request.cluster_name,
            repository_version = ?request.repository_version,
            checks = rules.len(),
            parallel = self.config.parallel,
            "Running prerequisite checks"
        );

        let outcomes = if self.config.parallel {
            join_all(
                rules
                    .iter()
                    .map(|rule| evaluate(*rule, request, correlation_id)),
            )
            .await
        } else {
            let mut outcomes = Vec::with_capacity(rules.len());
            for rule in &rules {
                outcomes.push(evaluate(*rule, request, correlation_id).await);
            }
            outcomes
        };

        let mut results = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Ok(Some(check)) => results.push(check),
                Ok(None) => {}
                Err(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        cluster = %request.cluster_name,
                        error = %err,
                        "Prerequisite check run aborted"
                    );
                    return Err(err);
                }
            }
        }

        let report = CheckReport {
            correlation_id,
            cluster_name: request.cluster_name.clone(),
            evaluated_at: Utc::now(),
            results,
        };

        info!(
            correlation_id = %correlation_id,
            cluster = %request.cluster_name,
            evaluated = report.results.len(),
            failed = report.failures().count(),
            permitted = report.is_permitted(),
            "Prerequisite checks complete"
        );

        Ok(report)
    }
}

/// Run one rule end to end. Lookup failures inside `perform` become a FAIL
/// result; failures inside `is_applicable` abort the run.
async fn evaluate(
    rule: &dyn PrerequisiteCheckRule,
    request: &PrereqCheckRequest,
    correlation_id: Uuid,
) -> RuleResult<Option<PrerequisiteCheck>> {
    let id = rule.descriptor().id;

    let applicable = rule
        .is_applicable(request)
        .await
        .map_err(|err| applicability_error(id, err))?;
    if !applicable {
        debug!(correlation_id = %correlation_id, check = id, "Check not applicable, skipping");
        return Ok(None);
    }

    let mut check = rule.new_result(request);
    if let Err(err) = rule.perform(&mut check, request).await {
        warn!(
            correlation_id = %correlation_id,
            check = id,
            error = %err,
            "Check could not complete, reporting as failed"
        );
        check.fail(format!("Unable to complete check {id}: {err}"));
    }

    log_check_operation(
        correlation_id,
        id,
        &request.cluster_name,
        check.status,
        check.fail_reason.as_deref(),
    );

    Ok(Some(check))
}

fn applicability_error(check: &str, err: CheckError) -> CheckError {
    match err {
        CheckError::Inventory(source) => CheckError::Applicability {
            check: check.to_string(),
            source,
        },
        other => other,
    }
}
