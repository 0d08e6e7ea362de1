use polaris_types::TargetKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The declarative form of a check, as written in YAML or JSON.
///
/// The predicate is a JSON Schema, given either structured (`schema`) or as a JSON
/// string (`jsonSchema`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckSpec {
    pub success_message: String,
    pub failure_message: String,
    pub category: String,

    /// Scope the check runs in.
    pub target: TargetKind,

    /// Shape the predicate expects. Defaults to `target`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_target: Option<TargetKind>,

    #[serde(default)]
    pub controllers: KindFilter,

    #[serde(default)]
    pub containers: ContainerFilter,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<String>,
}

/// Include/exclude by object kind. An empty `include` admits every kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct KindFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl KindFilter {
    pub fn admits(&self, kind: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|k| k == kind);
        included && !self.exclude.iter().any(|k| k == kind)
    }
}

/// Container classes a container-scoped check skips: `initContainer` and/or `container`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContainerFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl ContainerFilter {
    pub fn excludes(&self, class: &str) -> bool {
        self.exclude.iter().any(|c| c == class)
    }
}

impl CheckSpec {
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
