//! Pure check resolution and application (no IO).
//!
//! Input: a configuration, a check catalog, and manifest objects decoded elsewhere.
//! Output: one ordered result set per scope pass, or the first error that stopped the pass.

#![forbid(unsafe_code)]

pub mod evaluate;
pub mod exemption;
pub mod policy;
pub mod resolve;
pub mod results;

mod engine;
mod error;
mod workload;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{apply_container_checks, apply_controller_checks, apply_other_checks, apply_pod_checks};
pub use error::ValidationError;
pub use policy::{Configuration, Exemption, NamePatterns};
pub use workload::{
    ContainerResult, PodResult, WorkloadResult, validate_object, validate_resource, validate_workload,
};
