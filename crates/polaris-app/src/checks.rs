//! The `checks` use case: list the built-in catalog with default severities.

use polaris_check_catalog::CheckCatalog;
use polaris_types::{Severity, TargetKind};
use std::fmt::Write as _;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckListing {
    pub id: String,
    pub category: String,
    pub target: TargetKind,
    pub default_severity: Severity,
}

/// Built-in checks in evaluation order.
pub fn list_checks(catalog: &CheckCatalog) -> Vec<CheckListing> {
    catalog
        .iter()
        .map(|def| CheckListing {
            id: def.id.clone(),
            category: def.category.clone(),
            target: def.target,
            default_severity: polaris_settings::default_severity(&def.id)
                .unwrap_or(Severity::Ignore),
        })
        .collect()
}

pub fn format_check_list(checks: &[CheckListing]) -> String {
    let width = checks.iter().map(|c| c.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for check in checks {
        let _ = writeln!(
            out,
            "{:<width$}  {:<10} {:<13} {}",
            check.id,
            check.target.as_str(),
            check.category,
            check.default_severity.as_str()
        );
    }
    out
}
