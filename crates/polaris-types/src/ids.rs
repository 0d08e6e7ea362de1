//! Stable identifiers for built-in checks and exemption annotations.
//!
//! Check IDs are lowerCamelCase and double as the file stem of the built-in definition.

// Controller checks
pub const CHECK_MULTIPLE_REPLICAS_FOR_DEPLOYMENT: &str = "multipleReplicasForDeployment";

// Pod checks
pub const CHECK_HOST_IPC_SET: &str = "hostIPCSet";
pub const CHECK_HOST_PID_SET: &str = "hostPIDSet";
pub const CHECK_HOST_NETWORK_SET: &str = "hostNetworkSet";
pub const CHECK_PRIORITY_CLASS_NOT_SET: &str = "priorityClassNotSet";

// Container checks
pub const CHECK_MEMORY_LIMITS_MISSING: &str = "memoryLimitsMissing";
pub const CHECK_MEMORY_REQUESTS_MISSING: &str = "memoryRequestsMissing";
pub const CHECK_CPU_LIMITS_MISSING: &str = "cpuLimitsMissing";
pub const CHECK_CPU_REQUESTS_MISSING: &str = "cpuRequestsMissing";
pub const CHECK_READINESS_PROBE_MISSING: &str = "readinessProbeMissing";
pub const CHECK_LIVENESS_PROBE_MISSING: &str = "livenessProbeMissing";
pub const CHECK_PULL_POLICY_NOT_ALWAYS: &str = "pullPolicyNotAlways";
pub const CHECK_TAG_NOT_SPECIFIED: &str = "tagNotSpecified";
pub const CHECK_HOST_PORT_SET: &str = "hostPortSet";
pub const CHECK_RUN_AS_ROOT_ALLOWED: &str = "runAsRootAllowed";
pub const CHECK_RUN_AS_PRIVILEGED: &str = "runAsPrivileged";
pub const CHECK_NOT_READ_ONLY_ROOT_FILESYSTEM: &str = "notReadOnlyRootFilesystem";
pub const CHECK_PRIVILEGE_ESCALATION_ALLOWED: &str = "privilegeEscalationAllowed";
pub const CHECK_DANGEROUS_CAPABILITIES: &str = "dangerousCapabilities";
pub const CHECK_INSECURE_CAPABILITIES: &str = "insecureCapabilities";

// Other-object checks
pub const CHECK_TLS_SETTINGS_MISSING: &str = "tlsSettingsMissing";
pub const CHECK_PDB_DISRUPTIONS_ALLOWED: &str = "pdbDisruptionsAllowedGreaterThanZero";

// Exemption annotations
pub const EXEMPTION_ANNOTATION_KEY: &str = "polaris.fairwinds.com/exempt";
pub const EXEMPTION_ANNOTATION_PREFIX: &str = "polaris.fairwinds.com/";
pub const EXEMPTION_ANNOTATION_SUFFIX: &str = "-exempt";

/// Annotation key that exempts a single check, e.g. `polaris.fairwinds.com/hostIPCSet-exempt`.
pub fn exemption_annotation_for(check_id: &str) -> String {
    format!("{EXEMPTION_ANNOTATION_PREFIX}{check_id}{EXEMPTION_ANNOTATION_SUFFIX}")
}

// Container exclusion markers used by check definitions.
pub const CONTAINER_KIND_INIT: &str = "initContainer";
pub const CONTAINER_KIND_REGULAR: &str = "container";
