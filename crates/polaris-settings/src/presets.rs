use polaris_types::Severity;
use polaris_types::ids::*;
use std::collections::BTreeMap;

/// Severity of a built-in check when the config does not mention it.
///
/// Host namespaces, privilege and unpinned images are dangerous; replica count, pull policy
/// and priority class are opt-in. Everything else warns.
pub fn default_severity(check_id: &str) -> Option<Severity> {
    let severity = match check_id {
        CHECK_MULTIPLE_REPLICAS_FOR_DEPLOYMENT
        | CHECK_PULL_POLICY_NOT_ALWAYS
        | CHECK_PRIORITY_CLASS_NOT_SET => Severity::Ignore,

        CHECK_HOST_IPC_SET
        | CHECK_HOST_PID_SET
        | CHECK_TAG_NOT_SPECIFIED
        | CHECK_RUN_AS_PRIVILEGED
        | CHECK_PRIVILEGE_ESCALATION_ALLOWED
        | CHECK_DANGEROUS_CAPABILITIES => Severity::Danger,

        CHECK_HOST_NETWORK_SET
        | CHECK_MEMORY_LIMITS_MISSING
        | CHECK_MEMORY_REQUESTS_MISSING
        | CHECK_CPU_LIMITS_MISSING
        | CHECK_CPU_REQUESTS_MISSING
        | CHECK_READINESS_PROBE_MISSING
        | CHECK_LIVENESS_PROBE_MISSING
        | CHECK_HOST_PORT_SET
        | CHECK_RUN_AS_ROOT_ALLOWED
        | CHECK_NOT_READ_ONLY_ROOT_FILESYSTEM
        | CHECK_INSECURE_CAPABILITIES
        | CHECK_TLS_SETTINGS_MISSING
        | CHECK_PDB_DISRUPTIONS_ALLOWED => Severity::Warning,

        _ => return None,
    };
    Some(severity)
}

/// Default severities for every built-in check.
pub fn default_checks() -> BTreeMap<String, Severity> {
    polaris_check_catalog::BUILTIN_CHECK_ORDER
        .iter()
        .filter_map(|id| default_severity(id).map(|s| (id.to_string(), s)))
        .collect()
}
