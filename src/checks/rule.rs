use super::error::RuleResult;
use super::request::PrereqCheckRequest;
use super::result::{CheckType, PrerequisiteCheck};
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Identity of a check rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckDescriptor {
    /// Unique code, e.g. `HOSTS_MASTER_MAINTENANCE`
    pub id: &'static str,
    pub check_type: CheckType,
    pub description: &'static str,
}

/// Contract every prerequisite check implements.
///
/// Rules are stateless across invocations and must not depend on any other
/// rule having run; the orchestrator may evaluate them in any order or
/// concurrently.
#[async_trait]
pub trait PrerequisiteCheckRule: Send + Sync {
    fn descriptor(&self) -> &CheckDescriptor;

    /// Whether the rule applies to `request`. `Ok(false)` skips the rule silently.
    /// Only lookup failures the request cannot recover from (unknown cluster) are errors.
    async fn is_applicable(&self, request: &PrereqCheckRequest) -> RuleResult<bool>;

    /// Populate `check`. It starts at `PASS`; a rule that finds nothing wrong leaves it there.
    async fn perform(
        &self,
        check: &mut PrerequisiteCheck,
        request: &PrereqCheckRequest,
    ) -> RuleResult<()>;

    /// Fresh result carrying this rule's identity
    fn new_result(&self, request: &PrereqCheckRequest) -> PrerequisiteCheck {
        let descriptor = self.descriptor();
        PrerequisiteCheck::new(
            descriptor.id,
            descriptor.description,
            descriptor.check_type,
            request.cluster_name.as_str(),
        )
    }
}

/// Join entity names for a failure reason: `a`, `a and b`, `a, b and c`.
pub fn format_entity_list(entities: &BTreeSet<String>) -> String {
    let names: Vec<&str> = entities.iter().map(String::as_str).collect();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => (*last).to_string(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_format_entity_list() {
        assert_eq!(format_entity_list(&set(&[])), "");
        assert_eq!(format_entity_list(&set(&["h1"])), "h1");
        assert_eq!(format_entity_list(&set(&["h1", "h2"])), "h1 and h2");
        assert_eq!(format_entity_list(&set(&["h3", "h1", "h2"])), "h1, h2 and h3");
    }
}
