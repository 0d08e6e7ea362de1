use polaris_kube::KubeObject;
use polaris_types::CountSummary;
use polaris_validator::WorkloadResult;
use serde::Serialize;
use std::collections::BTreeSet;
use time::OffsetDateTime;

pub const OUTPUT_VERSION: &str = "1.0";

/// Counts describing what was audited.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ClusterInfo {
    pub version: String,
    pub nodes: u32,
    pub pods: u32,
    pub namespaces: u32,
    pub controllers: u32,
}

impl ClusterInfo {
    /// Describe a set of manifests read from disk; there is no cluster to ask.
    pub fn from_objects(objects: &[KubeObject]) -> Self {
        let mut info = ClusterInfo {
            version: "unknown".to_string(),
            ..ClusterInfo::default()
        };
        let mut namespaces = BTreeSet::new();
        for object in objects {
            let meta = object.meta();
            if !meta.namespace.is_empty() {
                namespaces.insert(meta.namespace.as_str());
            }
            if let KubeObject::Workload(workload) = object {
                info.pods += 1;
                if workload.kind != "Pod" {
                    info.controllers += 1;
                }
            }
        }
        info.namespaces = namespaces.len() as u32;
        info
    }
}

/// The audit report.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuditData {
    pub polaris_output_version: String,
    #[serde(with = "time::serde::rfc3339")]
    pub audit_time: OffsetDateTime,
    pub source_type: String,
    pub source_name: String,
    pub display_name: String,
    pub cluster_info: ClusterInfo,
    pub results: Vec<WorkloadResult>,
    pub score: u32,
}

impl AuditData {
    pub fn summary(&self) -> CountSummary {
        let mut counts = CountSummary::default();
        for result in &self.results {
            counts.add(result.summary());
        }
        counts
    }
}
