//! Use case orchestration for polaris.
//!
//! Coordinates manifest loading, configuration, the validator and rendering. The CLI crate
//! depends on this and only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod audit;
mod checks;
mod render;
mod report;

pub use audit::{AuditInput, AuditOutput, ConfigFormat, ExitPolicy, audit_exit_code, run_audit};
pub use checks::{CheckListing, format_check_list, list_checks};
pub use render::{render_json, render_pretty, write_output};
pub use report::{AuditData, ClusterInfo, OUTPUT_VERSION};
