//! Stable DTOs and IDs used across the polaris workspace.
//!
//! This crate is intentionally boring:
//! - severities and check targets
//! - the per-check result record and the ordered result set
//! - stable built-in check IDs and exemption annotation keys

#![forbid(unsafe_code)]

pub mod ids;
pub mod result;

pub use result::{CountSummary, ResultMessage, ResultSet, Severity, TargetKind};
