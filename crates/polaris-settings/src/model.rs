use polaris_check_catalog::CheckSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Polaris config file, version 1.
///
/// User-facing and permissive: severities stay strings until resolution so that a typo is
/// reported with the check it belongs to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolarisConfigV1 {
    /// Map of check ID -> `ignore`, `warning` or `danger`. Overrides the defaults.
    #[serde(default)]
    pub checks: BTreeMap<String, String>,

    /// Checks defined by this config. A custom check with a built-in ID replaces it.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_checks: BTreeMap<String, CheckSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exemptions: Vec<ExemptionConfig>,

    /// Ignore `polaris.fairwinds.com/*exempt` annotations on manifests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disallow_exemptions: Option<bool>,

    /// Ignore the `exemptions` list in this file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disallow_config_exemptions: Option<bool>,
}

/// Skip checks for matching objects. Empty fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExemptionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Glob patterns over object names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controller_names: Vec<String>,

    /// Glob patterns over container names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub container_names: Vec<String>,

    /// Check IDs this exemption covers; empty covers all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<String>,
}
