//! Shared test utilities for the polaris workspace.
//!
//! Lives in its own crate because the CLI and xtask tests need the same manifests and
//! the same audit normalization as the library crates.

use polaris_kube::{ManifestError, Resource, Workload};
use serde_json::{Map, Value, json};

/// A container that passes every built-in container check.
pub fn compliant_container(name: &str) -> Value {
    json!({
        "name": name,
        "image": "registry.example.com/app:1.4.2",
        "imagePullPolicy": "Always",
        "resources": {
            "requests": { "cpu": "100m", "memory": "128Mi" },
            "limits": { "cpu": "500m", "memory": "256Mi" }
        },
        "readinessProbe": { "httpGet": { "path": "/ready", "port": 8080 } },
        "livenessProbe": { "httpGet": { "path": "/live", "port": 8080 } },
        "securityContext": {
            "runAsNonRoot": true,
            "privileged": false,
            "readOnlyRootFilesystem": true,
            "allowPrivilegeEscalation": false,
            "capabilities": { "drop": ["ALL"] }
        }
    })
}

/// `compliant_container` with `resources.limits.memory` removed.
pub fn container_without_memory_limit(name: &str) -> Value {
    let mut container = compliant_container(name);
    if let Some(limits) = container
        .pointer_mut("/resources/limits")
        .and_then(Value::as_object_mut)
    {
        limits.remove("memory");
    }
    container
}

/// Builds a workload manifest as JSON. Defaults to an `apps/v1` Deployment.
#[derive(Clone, Debug)]
pub struct ManifestBuilder {
    kind: String,
    api_version: String,
    name: String,
    namespace: String,
    annotations: Map<String, Value>,
    replicas: Option<u64>,
    containers: Vec<Value>,
    init_containers: Vec<Value>,
    pod_fields: Map<String, Value>,
}

pub fn deployment(name: &str) -> ManifestBuilder {
    ManifestBuilder {
        kind: "Deployment".to_string(),
        api_version: "apps/v1".to_string(),
        name: name.to_string(),
        namespace: "default".to_string(),
        annotations: Map::new(),
        replicas: None,
        containers: Vec::new(),
        init_containers: Vec::new(),
        pod_fields: Map::new(),
    }
}

pub fn pod(name: &str) -> ManifestBuilder {
    ManifestBuilder {
        kind: "Pod".to_string(),
        api_version: "v1".to_string(),
        ..deployment(name)
    }
}

impl ManifestBuilder {
    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    pub fn annotation(mut self, key: &str, value: &str) -> Self {
        self.annotations
            .insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    pub fn replicas(mut self, replicas: u64) -> Self {
        self.replicas = Some(replicas);
        self
    }

    pub fn container(mut self, container: Value) -> Self {
        self.containers.push(container);
        self
    }

    pub fn init_container(mut self, container: Value) -> Self {
        self.init_containers.push(container);
        self
    }

    pub fn pod_field(mut self, key: &str, value: Value) -> Self {
        self.pod_fields.insert(key.to_string(), value);
        self
    }

    fn pod_spec(&self) -> Value {
        let mut spec = self.pod_fields.clone();
        spec.insert("containers".into(), Value::Array(self.containers.clone()));
        if !self.init_containers.is_empty() {
            spec.insert(
                "initContainers".into(),
                Value::Array(self.init_containers.clone()),
            );
        }
        Value::Object(spec)
    }

    pub fn build(&self) -> Value {
        let mut metadata = Map::new();
        metadata.insert("name".into(), Value::String(self.name.clone()));
        metadata.insert("namespace".into(), Value::String(self.namespace.clone()));
        if !self.annotations.is_empty() {
            metadata.insert("annotations".into(), Value::Object(self.annotations.clone()));
        }

        let spec = match self.kind.as_str() {
            "Pod" => self.pod_spec(),
            "CronJob" => json!({
                "schedule": "*/5 * * * *",
                "jobTemplate": { "spec": { "template": { "spec": self.pod_spec() } } }
            }),
            _ => {
                let mut spec = Map::new();
                if let Some(replicas) = self.replicas {
                    spec.insert("replicas".into(), json!(replicas));
                }
                spec.insert("template".into(), json!({ "spec": self.pod_spec() }));
                Value::Object(spec)
            }
        };

        json!({
            "apiVersion": self.api_version,
            "kind": self.kind,
            "metadata": metadata,
            "spec": spec,
        })
    }

    pub fn workload(&self) -> Result<Workload, ManifestError> {
        Workload::from_value(self.build())
    }

    pub fn to_yaml_string(&self) -> String {
        // JSON is a YAML subset; the manifest loader accepts it as-is.
        self.build().to_string()
    }
}

/// An Ingress with or without a TLS section.
pub fn ingress(name: &str, tls: bool) -> Result<Resource, ManifestError> {
    let mut spec = json!({ "rules": [{ "host": "example.com" }] });
    if tls {
        spec["tls"] = json!([{ "hosts": ["example.com"], "secretName": "example-tls" }]);
    }
    Resource::from_value(json!({
        "apiVersion": "networking.k8s.io/v1",
        "kind": "Ingress",
        "metadata": { "name": name, "namespace": "default" },
        "spec": spec,
    }))
}

/// Replace audit fields that change from run to run with fixed placeholders.
///
/// `AuditTime` is replaced at the root only; nothing nested carries a timestamp.
pub fn normalize_audit(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut()
        && obj.contains_key("AuditTime")
    {
        obj.insert(
            "AuditTime".to_string(),
            Value::String("__TIMESTAMP__".to_string()),
        );
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_builder_produces_a_workload() {
        let workload = deployment("web")
            .namespace("prod")
            .annotation("team", "core")
            .replicas(3)
            .container(compliant_container("app"))
            .init_container(compliant_container("setup"))
            .workload()
            .expect("workload");

        assert_eq!(workload.kind, "Deployment");
        assert_eq!(workload.meta.namespace, "prod");
        assert_eq!(workload.meta.annotation("team"), Some("core"));
        assert_eq!(workload.pod_spec.containers.len(), 1);
        assert_eq!(workload.pod_spec.init_containers[0].name, "setup");
        assert_eq!(workload.original["spec"]["replicas"], json!(3));
    }

    #[test]
    fn cron_job_nests_the_pod_template() {
        let workload = deployment("nightly")
            .kind("CronJob")
            .container(compliant_container("job"))
            .workload()
            .expect("workload");
        assert_eq!(workload.pod_spec.containers[0].name, "job");
    }

    #[test]
    fn memory_limit_is_removed() {
        let container = container_without_memory_limit("app");
        assert!(container.pointer("/resources/limits/memory").is_none());
        assert!(container.pointer("/resources/limits/cpu").is_some());
    }

    #[test]
    fn normalize_replaces_audit_time_only_at_root() {
        let value = json!({
            "AuditTime": "2024-01-01T00:00:00Z",
            "Results": [{ "AuditTime": "kept" }]
        });
        let normalized = normalize_audit(value);
        assert_eq!(normalized["AuditTime"], "__TIMESTAMP__");
        assert_eq!(normalized["Results"][0]["AuditTime"], "kept");
    }
}
