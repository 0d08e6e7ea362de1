use crate::definition::CheckDefinition;
use crate::error::CatalogError;
use polaris_types::ids::*;
use std::collections::BTreeMap;

/// Built-in checks in evaluation order.
///
/// The order is explicit (not alphabetical, not discovery order) so fixtures that depend
/// on it stay stable.
pub const BUILTIN_CHECK_ORDER: [&str; 22] = [
    // Controller checks
    CHECK_MULTIPLE_REPLICAS_FOR_DEPLOYMENT,
    // Pod checks
    CHECK_HOST_IPC_SET,
    CHECK_HOST_PID_SET,
    CHECK_HOST_NETWORK_SET,
    // Container checks
    CHECK_MEMORY_LIMITS_MISSING,
    CHECK_MEMORY_REQUESTS_MISSING,
    CHECK_CPU_LIMITS_MISSING,
    CHECK_CPU_REQUESTS_MISSING,
    CHECK_READINESS_PROBE_MISSING,
    CHECK_LIVENESS_PROBE_MISSING,
    CHECK_PULL_POLICY_NOT_ALWAYS,
    CHECK_TAG_NOT_SPECIFIED,
    CHECK_HOST_PORT_SET,
    CHECK_RUN_AS_ROOT_ALLOWED,
    CHECK_RUN_AS_PRIVILEGED,
    CHECK_NOT_READ_ONLY_ROOT_FILESYSTEM,
    CHECK_PRIVILEGE_ESCALATION_ALLOWED,
    CHECK_DANGEROUS_CAPABILITIES,
    CHECK_INSECURE_CAPABILITIES,
    CHECK_PRIORITY_CLASS_NOT_SET,
    // Other checks
    CHECK_TLS_SETTINGS_MISSING,
    CHECK_PDB_DISRUPTIONS_ALLOWED,
];

macro_rules! builtin_source {
    ($file:literal) => {
        include_str!(concat!("../checks/", $file, ".yaml"))
    };
}

fn builtin_source(check_id: &str) -> Option<&'static str> {
    let text = match check_id {
        CHECK_MULTIPLE_REPLICAS_FOR_DEPLOYMENT => builtin_source!("multipleReplicasForDeployment"),
        CHECK_HOST_IPC_SET => builtin_source!("hostIPCSet"),
        CHECK_HOST_PID_SET => builtin_source!("hostPIDSet"),
        CHECK_HOST_NETWORK_SET => builtin_source!("hostNetworkSet"),
        CHECK_MEMORY_LIMITS_MISSING => builtin_source!("memoryLimitsMissing"),
        CHECK_MEMORY_REQUESTS_MISSING => builtin_source!("memoryRequestsMissing"),
        CHECK_CPU_LIMITS_MISSING => builtin_source!("cpuLimitsMissing"),
        CHECK_CPU_REQUESTS_MISSING => builtin_source!("cpuRequestsMissing"),
        CHECK_READINESS_PROBE_MISSING => builtin_source!("readinessProbeMissing"),
        CHECK_LIVENESS_PROBE_MISSING => builtin_source!("livenessProbeMissing"),
        CHECK_PULL_POLICY_NOT_ALWAYS => builtin_source!("pullPolicyNotAlways"),
        CHECK_TAG_NOT_SPECIFIED => builtin_source!("tagNotSpecified"),
        CHECK_HOST_PORT_SET => builtin_source!("hostPortSet"),
        CHECK_RUN_AS_ROOT_ALLOWED => builtin_source!("runAsRootAllowed"),
        CHECK_RUN_AS_PRIVILEGED => builtin_source!("runAsPrivileged"),
        CHECK_NOT_READ_ONLY_ROOT_FILESYSTEM => builtin_source!("notReadOnlyRootFilesystem"),
        CHECK_PRIVILEGE_ESCALATION_ALLOWED => builtin_source!("privilegeEscalationAllowed"),
        CHECK_DANGEROUS_CAPABILITIES => builtin_source!("dangerousCapabilities"),
        CHECK_INSECURE_CAPABILITIES => builtin_source!("insecureCapabilities"),
        CHECK_PRIORITY_CLASS_NOT_SET => builtin_source!("priorityClassNotSet"),
        CHECK_TLS_SETTINGS_MISSING => builtin_source!("tlsSettingsMissing"),
        CHECK_PDB_DISRUPTIONS_ALLOWED => builtin_source!("pdbDisruptionsAllowedGreaterThanZero"),
        _ => return None,
    };
    Some(text)
}

/// An immutable set of check definitions with a declared order.
///
/// Built once and shared read-only; custom checks are never added here but passed
/// alongside at resolution time.
#[derive(Clone, Debug, Default)]
pub struct CheckCatalog {
    order: Vec<String>,
    checks: BTreeMap<String, CheckDefinition>,
}

impl CheckCatalog {
    /// Decode and compile every built-in check. Any failure means the catalog is broken.
    pub fn builtin() -> Result<Self, CatalogError> {
        let mut definitions = Vec::with_capacity(BUILTIN_CHECK_ORDER.len());
        for check_id in BUILTIN_CHECK_ORDER {
            let text = builtin_source(check_id).ok_or_else(|| CatalogError::InvalidDefinition {
                check_id: check_id.to_string(),
                reason: "no embedded definition".to_string(),
            })?;
            let definition = CheckDefinition::from_yaml(check_id, text)?;
            definition
                .predicate
                .capability()
                .prepare()
                .map_err(|source| CatalogError::Predicate {
                    check_id: check_id.to_string(),
                    source,
                })?;
            definitions.push(definition);
        }
        let catalog = Self::from_definitions(definitions)?;
        tracing::debug!(checks = catalog.len(), "loaded built-in check catalog");
        Ok(catalog)
    }

    /// Build a catalog from already-decoded definitions, keeping their order.
    pub fn from_definitions(definitions: Vec<CheckDefinition>) -> Result<Self, CatalogError> {
        let mut catalog = CheckCatalog::default();
        for definition in definitions {
            if catalog.checks.contains_key(&definition.id) {
                return Err(CatalogError::Duplicate {
                    check_id: definition.id,
                });
            }
            catalog.order.push(definition.id.clone());
            catalog.checks.insert(definition.id.clone(), definition);
        }
        Ok(catalog)
    }

    pub fn get(&self, check_id: &str) -> Option<&CheckDefinition> {
        self.checks.get(check_id)
    }

    /// Look up `check_id`, letting `custom` shadow the catalog.
    pub fn resolve<'a>(
        &'a self,
        check_id: &str,
        custom: &'a BTreeMap<String, CheckDefinition>,
    ) -> Option<&'a CheckDefinition> {
        custom.get(check_id).or_else(|| self.get(check_id))
    }

    /// Check IDs in declared order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Definitions in declared order.
    pub fn iter(&self) -> impl Iterator<Item = &CheckDefinition> {
        self.order.iter().filter_map(|id| self.checks.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
