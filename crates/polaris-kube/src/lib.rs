//! Manifest adapters: the Kubernetes object model polaris validates, plus parsing and discovery.
//!
//! Parsing is IO-free and works on strings. Discovery and loading read from the filesystem;
//! nothing here talks to a cluster.

#![forbid(unsafe_code)]

mod discover;
mod error;
mod model;
mod parse;
mod workload;

pub use discover::{discover_manifests, load_path};
pub use error::ManifestError;
pub use model::{Container, ObjectMeta, PodSpec};
pub use parse::{parse_documents, parse_objects};
pub use workload::{pod_spec_pointer, KubeObject, Resource, Workload};
