use crate::inventory::InventoryError;
use thiserror::Error;

/// Errors raised while evaluating prerequisite checks
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckError {
    #[error("Inventory lookup failed: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Check {check} could not determine applicability: {source}")]
    Applicability {
        check: String,
        #[source]
        source: InventoryError,
    },

    #[error("Check {check} could not be evaluated: {reason}")]
    Evaluation { check: String, reason: String },

    #[error("Check {check} is already registered")]
    DuplicateRule { check: String },
}

pub type RuleResult<T> = Result<T, CheckError>;

/// Helper to build evaluation errors
pub fn evaluation_error(check: impl Into<String>, reason: impl Into<String>) -> CheckError {
    CheckError::Evaluation {
        check: check.into(),
        reason: reason.into(),
    }
}
