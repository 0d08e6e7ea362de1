use globset::{Glob, GlobSet, GlobSetBuilder};
use polaris_check_catalog::CheckDefinition;
use polaris_types::Severity;
use std::collections::BTreeMap;

/// Glob patterns over object or container names. Plain names match themselves.
#[derive(Clone, Debug, Default)]
pub struct NamePatterns {
    patterns: Vec<String>,
    set: GlobSet,
}

impl NamePatterns {
    pub fn new(patterns: Vec<String>) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            set: builder.build()?,
            patterns,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.set.is_match(name)
    }
}

/// A configuration-level exemption. Every non-empty field must match for it to apply.
#[derive(Clone, Debug, Default)]
pub struct Exemption {
    pub namespace: Option<String>,
    pub controller_names: NamePatterns,
    pub container_names: NamePatterns,
    /// Check IDs; empty means every check.
    pub rules: Vec<String>,
}

impl Exemption {
    pub fn applies(
        &self,
        check_id: &str,
        namespace: &str,
        name: &str,
        container_name: Option<&str>,
    ) -> bool {
        if self.namespace.as_deref().is_some_and(|ns| ns != namespace) {
            return false;
        }
        if !self.controller_names.is_empty() && !self.controller_names.is_match(name) {
            return false;
        }
        if !self.container_names.is_empty()
            && !container_name.is_some_and(|c| self.container_names.is_match(c))
        {
            return false;
        }
        self.rules.is_empty() || self.rules.iter().any(|r| r == check_id)
    }
}

/// The active configuration for a set of passes. Immutable once built.
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    /// Severity per check ID. Only IDs listed here are evaluated.
    pub checks: BTreeMap<String, Severity>,
    /// Custom checks; these shadow built-ins with the same ID.
    pub custom_checks: BTreeMap<String, CheckDefinition>,
    pub exemptions: Vec<Exemption>,
    /// Ignore exemption annotations on manifests.
    pub disallow_exemptions: bool,
    /// Ignore `exemptions` above.
    pub disallow_config_exemptions: bool,
}

impl Configuration {
    pub fn severity(&self, check_id: &str) -> Option<Severity> {
        self.checks.get(check_id).copied()
    }

    /// Check IDs to evaluate, in lexicographic order.
    pub fn check_ids(&self) -> impl Iterator<Item = &str> {
        self.checks.keys().map(String::as_str)
    }

    /// Whether the configuration wants `check_id` run for this object/container.
    pub fn is_actionable(
        &self,
        check_id: &str,
        namespace: &str,
        name: &str,
        container_name: Option<&str>,
    ) -> bool {
        if !self.severity(check_id).is_some_and(Severity::is_actionable) {
            return false;
        }
        if self.disallow_config_exemptions {
            return true;
        }
        !self
            .exemptions
            .iter()
            .any(|e| e.applies(check_id, namespace, name, container_name))
    }
}
