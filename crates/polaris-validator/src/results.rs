use crate::policy::Configuration;
use polaris_check_catalog::CheckDefinition;
use polaris_types::{ResultMessage, Severity};

/// Build the record for one evaluated check. Severity always comes from `conf`.
pub fn make_result(conf: &Configuration, definition: &CheckDefinition, passed: bool) -> ResultMessage {
    ResultMessage {
        id: definition.id.clone(),
        message: definition.message(passed).to_string(),
        success: passed,
        severity: conf.severity(&definition.id).unwrap_or(Severity::Ignore),
        category: definition.category.clone(),
    }
}
