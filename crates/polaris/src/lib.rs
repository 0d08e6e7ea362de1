//! Validate Kubernetes manifests against configurable checks.
//!
//! ```no_run
//! use polaris::{CheckCatalog, Configuration, KubeObject, validate_object};
//!
//! # fn run(objects: Vec<KubeObject>, conf: Configuration) -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = CheckCatalog::builtin()?;
//! for object in &objects {
//!     let result = validate_object(&conf, &catalog, object)?;
//!     println!("{} {}: score {}", result.kind, result.name, result.summary().score());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub use polaris_check_catalog::{
    BUILTIN_CHECK_ORDER, CatalogError, CheckCatalog, CheckDefinition, CheckSpec,
    FragmentPredicate, JsonSchemaPredicate, Predicate,
};
pub use polaris_kube::{Container, KubeObject, ObjectMeta, PodSpec, Resource, Workload};
pub use polaris_types::{CountSummary, ResultMessage, ResultSet, Severity, TargetKind, ids};
pub use polaris_validator::{
    Configuration, ContainerResult, Exemption, NamePatterns, PodResult, ValidationError,
    WorkloadResult, apply_container_checks, apply_controller_checks, apply_other_checks,
    apply_pod_checks, validate_object, validate_resource, validate_workload,
};
