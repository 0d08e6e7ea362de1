use crate::policy::Configuration;
use polaris_check_catalog::{BUILTIN_CHECK_ORDER, CheckCatalog};
use polaris_types::Severity;

pub fn catalog() -> CheckCatalog {
    CheckCatalog::builtin().expect("built-in catalog")
}

/// Every built-in check at `severity`.
pub fn all_checks(severity: Severity) -> Configuration {
    Configuration {
        checks: BUILTIN_CHECK_ORDER
            .iter()
            .map(|id| (id.to_string(), severity))
            .collect(),
        ..Configuration::default()
    }
}

/// Only the listed checks, each at `severity`.
pub fn only_checks(ids: &[&str], severity: Severity) -> Configuration {
    Configuration {
        checks: ids.iter().map(|id| (id.to_string(), severity)).collect(),
        ..Configuration::default()
    }
}
