//! # Prerequisite Checks
//!
//! Admission control for cluster-wide operations. A [`CheckRegistry`] holds
//! independent [`PrerequisiteCheckRule`]s; the [`CheckOrchestrator`] runs the
//! applicable ones against a [`PrereqCheckRequest`] and gates the operation on
//! the resulting [`CheckReport`].

pub mod error;
pub mod orchestrator;
pub mod registry;
pub mod request;
pub mod result;
pub mod rule;
pub mod rules;

pub use error::{CheckError, RuleResult};
pub use orchestrator::{CheckOrchestrator, CheckReport};
pub use registry::CheckRegistry;
pub use request::PrereqCheckRequest;
pub use result::{CheckStatus, CheckType, PrerequisiteCheck};
pub use rule::{format_entity_list, CheckDescriptor, PrerequisiteCheckRule};
