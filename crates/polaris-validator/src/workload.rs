use crate::engine::{
    apply_container_checks, apply_controller_checks, apply_other_checks, apply_pod_checks,
};
use crate::error::ValidationError;
use crate::policy::Configuration;
use polaris_check_catalog::CheckCatalog;
use polaris_kube::{KubeObject, ObjectMeta, Resource, Workload};
use polaris_types::{CountSummary, ResultSet};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerResult {
    pub name: String,
    pub results: ResultSet,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PodResult {
    pub name: String,
    pub results: ResultSet,
    pub container_results: Vec<ContainerResult>,
}

impl PodResult {
    pub fn summary(&self) -> CountSummary {
        let mut counts = self.results.summary();
        for container in &self.container_results {
            counts.add(container.results.summary());
        }
        counts
    }
}

/// Every result for one manifest object. `pod_result` is absent for non-workload resources.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkloadResult {
    pub name: String,
    pub namespace: String,
    pub kind: String,
    pub results: ResultSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_result: Option<PodResult>,
}

impl WorkloadResult {
    pub fn summary(&self) -> CountSummary {
        let mut counts = self.results.summary();
        if let Some(pod) = &self.pod_result {
            counts.add(pod.summary());
        }
        counts
    }
}

fn identity(kind: &str, meta: &ObjectMeta) -> String {
    if meta.namespace.is_empty() {
        format!("{kind} {}", meta.name)
    } else {
        format!("{kind} {}/{}", meta.namespace, meta.name)
    }
}

/// Controller, pod and per-container passes; regular containers before init containers.
pub fn validate_workload(
    conf: &Configuration,
    catalog: &CheckCatalog,
    workload: &Workload,
) -> Result<WorkloadResult, ValidationError> {
    let tag = |e: ValidationError| e.in_object(identity(&workload.kind, &workload.meta));

    let results = apply_controller_checks(conf, catalog, workload).map_err(tag)?;
    let pod_results = apply_pod_checks(conf, catalog, workload).map_err(tag)?;

    let containers = workload
        .pod_spec
        .containers
        .iter()
        .map(|c| (c, false))
        .chain(workload.pod_spec.init_containers.iter().map(|c| (c, true)));
    let mut container_results = Vec::new();
    for (container, is_init) in containers {
        let results =
            apply_container_checks(conf, catalog, workload, container, is_init).map_err(tag)?;
        container_results.push(ContainerResult {
            name: container.name.clone(),
            results,
        });
    }

    Ok(WorkloadResult {
        name: workload.meta.name.clone(),
        namespace: workload.meta.namespace.clone(),
        kind: workload.kind.clone(),
        results,
        pod_result: Some(PodResult {
            name: workload.meta.name.clone(),
            results: pod_results,
            container_results,
        }),
    })
}

/// Other-object checks for a resource that carries no pod spec.
pub fn validate_resource(
    conf: &Configuration,
    catalog: &CheckCatalog,
    resource: &Resource,
) -> Result<WorkloadResult, ValidationError> {
    let results = apply_other_checks(conf, catalog, resource)
        .map_err(|e| e.in_object(identity(&resource.kind, &resource.meta)))?;
    Ok(WorkloadResult {
        name: resource.meta.name.clone(),
        namespace: resource.meta.namespace.clone(),
        kind: resource.kind.clone(),
        results,
        pod_result: None,
    })
}

pub fn validate_object(
    conf: &Configuration,
    catalog: &CheckCatalog,
    object: &KubeObject,
) -> Result<WorkloadResult, ValidationError> {
    match object {
        KubeObject::Workload(workload) => validate_workload(conf, catalog, workload),
        KubeObject::Resource(resource) => validate_resource(conf, catalog, resource),
    }
}
