use crate::error::ManifestError;
use crate::model::{ObjectMeta, PodSpec};
use serde_json::Value;

/// JSON pointer to the pod spec for kinds that run pods, `None` for everything else.
pub fn pod_spec_pointer(kind: &str) -> Option<&'static str> {
    match kind {
        "Pod" => Some("/spec"),
        "Deployment" | "StatefulSet" | "DaemonSet" | "ReplicaSet" | "ReplicationController"
        | "Job" => Some("/spec/template/spec"),
        "CronJob" => Some("/spec/jobTemplate/spec/template/spec"),
        _ => None,
    }
}

/// A controller (or bare pod) together with the pod spec it runs.
#[derive(Clone, Debug, PartialEq)]
pub struct Workload {
    pub kind: String,
    pub api_version: String,
    pub meta: ObjectMeta,
    pub pod_spec: PodSpec,
    /// The object exactly as it was decoded, for controller-shaped predicates.
    pub original: Value,
}

/// Any object without a dedicated pod/controller shape (Ingress, PodDisruptionBudget, CRDs...).
#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
    pub kind: String,
    pub api_version: String,
    pub meta: ObjectMeta,
    pub object: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub enum KubeObject {
    Workload(Workload),
    Resource(Resource),
}

impl KubeObject {
    /// Classify a decoded object by kind.
    pub fn from_value(value: Value) -> Result<Self, ManifestError> {
        let (kind, api_version, meta) = header(&value)?;
        let Some(pointer) = pod_spec_pointer(&kind) else {
            return Ok(KubeObject::Resource(Resource {
                kind,
                api_version,
                meta,
                object: value,
            }));
        };

        let raw_spec = value
            .pointer(pointer)
            .ok_or_else(|| ManifestError::MissingPodSpec {
                kind: kind.clone(),
                name: meta.name.clone(),
                pointer,
            })?;
        let pod_spec: PodSpec =
            serde_json::from_value(raw_spec.clone()).map_err(|source| ManifestError::PodSpec {
                kind: kind.clone(),
                name: meta.name.clone(),
                source,
            })?;

        Ok(KubeObject::Workload(Workload {
            kind,
            api_version,
            meta,
            pod_spec,
            original: value,
        }))
    }

    pub fn kind(&self) -> &str {
        match self {
            KubeObject::Workload(w) => &w.kind,
            KubeObject::Resource(r) => &r.kind,
        }
    }

    pub fn meta(&self) -> &ObjectMeta {
        match self {
            KubeObject::Workload(w) => &w.meta,
            KubeObject::Resource(r) => &r.meta,
        }
    }
}

impl Workload {
    pub fn from_value(value: Value) -> Result<Self, ManifestError> {
        match KubeObject::from_value(value)? {
            KubeObject::Workload(w) => Ok(w),
            KubeObject::Resource(r) => Err(ManifestError::MissingPodSpec {
                kind: r.kind,
                name: r.meta.name,
                pointer: "/spec",
            }),
        }
    }
}

impl Resource {
    /// Wrap any object as a resource, regardless of whether its kind runs pods.
    pub fn from_value(value: Value) -> Result<Self, ManifestError> {
        let (kind, api_version, meta) = header(&value)?;
        Ok(Resource {
            kind,
            api_version,
            meta,
            object: value,
        })
    }
}

fn header(value: &Value) -> Result<(String, String, ObjectMeta), ManifestError> {
    let kind = value
        .get("kind")
        .and_then(Value::as_str)
        .ok_or(ManifestError::MissingKind)?
        .to_string();
    let api_version = value
        .get("apiVersion")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let meta = match value.get("metadata") {
        Some(raw) if !raw.is_null() => serde_json::from_value(raw.clone()).map_err(|source| {
            ManifestError::Metadata {
                kind: kind.clone(),
                source,
            }
        })?,
        _ => ObjectMeta::default(),
    };
    Ok((kind, api_version, meta))
}
