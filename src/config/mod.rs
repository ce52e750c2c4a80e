//! # Configuration
//!
//! YAML-backed settings for the check orchestrator, the rollup engine and
//! logging. A single `config/cluster-gate.yaml` holds the base values plus
//! optional `development` / `test` / `production` sections merged over them.
//!
//! ```rust,no_run
//! use cluster_gate::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let policy = manager.config().rollup.policy();
//! let parallel = manager.config().checks.parallel;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

use crate::status::{CompletionCategory, OperationStatus, RollupPolicy, StatusWeights};
use serde::{Deserialize, Serialize};

/// Root configuration structure mirroring cluster-gate.yaml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GateConfig {
    /// Prerequisite check orchestration
    pub checks: ChecksConfig,

    /// Status rollup counting and weighting
    pub rollup: RollupConfig,

    /// Log output
    pub logging: LoggingConfig,

    /// Environment the configuration was resolved for; set by the loader
    #[serde(skip_deserializing)]
    pub environment: String,
}

impl GateConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        self.rollup.validate()?;
        self.checks.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChecksConfig {
    /// Evaluate checks concurrently
    pub parallel: bool,
    /// Check codes never evaluated
    pub disabled: Vec<String>,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            disabled: Vec::new(),
        }
    }
}

impl ChecksConfig {
    pub fn is_disabled(&self, code: &str) -> bool {
        self.disabled.iter().any(|disabled| disabled == code)
    }

    fn validate(&self) -> ConfigResult<()> {
        if let Some(blank) = self.disabled.iter().find(|code| code.trim().is_empty()) {
            return Err(ConfigurationError::invalid_value(
                "checks.disabled",
                blank,
                "check codes must not be blank",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RollupConfig {
    /// Statuses counted toward COMPLETED in addition to COMPLETED itself
    pub completed_states: Vec<OperationStatus>,
    pub weights: StatusWeights,
}

impl Default for RollupConfig {
    fn default() -> Self {
        Self {
            completed_states: CompletionCategory::default().members(),
            weights: StatusWeights::default(),
        }
    }
}

impl RollupConfig {
    pub fn policy(&self) -> RollupPolicy {
        RollupPolicy::new(
            CompletionCategory::from_members(self.completed_states.iter().copied()),
            self.weights,
        )
    }

    fn validate(&self) -> ConfigResult<()> {
        let weights = [
            ("rollup.weights.queued", self.weights.queued),
            ("rollup.weights.active", self.weights.active),
            ("rollup.weights.completed", self.weights.completed),
        ];
        for (field, weight) in weights {
            if !(0.0..=1.0).contains(&weight) {
                return Err(ConfigurationError::invalid_value(
                    field,
                    weight,
                    "weights must be within [0.0, 1.0]",
                ));
            }
        }

        // A held unit is counted under its own bucket and again as in progress
        if 2.0 * self.weights.active > self.weights.completed {
            return Err(ConfigurationError::invalid_value(
                "rollup.weights.active",
                self.weights.active,
                "twice the active weight must not exceed the completed weight",
            ));
        }

        if let Some(status) = self.completed_states.iter().find(|status| {
            matches!(
                status,
                OperationStatus::Pending | OperationStatus::Queued | OperationStatus::InProgress
            ) || status.is_holding_state()
        }) {
            return Err(ConfigurationError::invalid_value(
                "rollup.completed_states",
                status,
                "only a finished status can count as completed",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; derived from the environment when absent
    pub level: Option<String>,
    pub format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = GateConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.checks.parallel);
        assert_eq!(config.rollup.policy(), RollupPolicy::default());
    }

    #[test]
    fn test_weight_out_of_range() {
        let mut config = GateConfig::default();
        config.rollup.weights.queued = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rollup.weights.queued"));
    }

    #[test]
    fn test_pending_cannot_count_as_completed() {
        let mut config = GateConfig::default();
        config.rollup.completed_states.push(OperationStatus::Pending);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_active_weight_bounded_by_completed() {
        let mut config = GateConfig::default();
        config.rollup.weights.active = 1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rollup.weights.active"));

        config.rollup.weights.active = 0.5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unfinished_states_cannot_count_as_completed() {
        for status in [
            OperationStatus::InProgress,
            OperationStatus::Holding,
            OperationStatus::HoldingFailed,
            OperationStatus::HoldingTimedout,
        ] {
            let mut config = GateConfig::default();
            config.rollup.completed_states.push(status);
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("rollup.completed_states"));
        }
    }

    #[test]
    fn test_validated_policy_stays_within_hundred_percent() {
        let mut config = GateConfig::default();
        config.rollup.weights.active = 0.5;
        config.validate().unwrap();

        let calculated = config.rollup.policy().calculate(
            &[OperationStatus::Holding, OperationStatus::HoldingFailed],
            false,
        );
        assert!(calculated.percent <= 100.0);
    }

    #[test]
    fn test_disabled_lookup() {
        let config = ChecksConfig {
            parallel: false,
            disabled: vec!["HOSTS_HEARTBEAT".to_string()],
        };
        assert!(config.is_disabled("HOSTS_HEARTBEAT"));
        assert!(!config.is_disabled("HOSTS_MASTER_MAINTENANCE"));
    }
}
