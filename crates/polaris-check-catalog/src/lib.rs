//! Check definitions and the built-in catalog.
//!
//! A check is decoded from a declarative [`CheckSpec`] into a [`CheckDefinition`] whose
//! predicate is bound to exactly one fragment shape. The built-in catalog is embedded at
//! compile time and decoded once, in a fixed order, by [`CheckCatalog::builtin`].

#![forbid(unsafe_code)]

mod catalog;
mod definition;
mod error;
mod predicate;
mod spec;

pub use catalog::{BUILTIN_CHECK_ORDER, CheckCatalog};
pub use definition::{CheckDefinition, Predicate};
pub use error::{CatalogError, PredicateError};
pub use predicate::{FragmentPredicate, JsonSchemaPredicate};
pub use spec::{CheckSpec, ContainerFilter, KindFilter};
