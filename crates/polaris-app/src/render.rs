//! Render use cases: JSON and a plain-text report from an in-memory audit.

use crate::report::AuditData;
use anyhow::Context;
use camino::Utf8Path;
use polaris_types::{ResultSet, Severity};
use std::fmt::Write as _;

pub fn render_json(data: &AuditData) -> anyhow::Result<String> {
    serde_json::to_string_pretty(data).context("serialize audit report")
}

/// Human-readable report: one block per object, failures marked by severity.
pub fn render_pretty(data: &AuditData) -> String {
    let mut out = String::new();
    let summary = data.summary();

    let _ = writeln!(out, "Polaris audited {} {}", data.source_type, data.display_name);
    let _ = writeln!(
        out,
        "Score: {} ({} passing, {} warnings, {} dangers)\n",
        data.score, summary.successes, summary.warnings, summary.dangers
    );

    if data.results.is_empty() {
        out.push_str("No objects found.\n");
        return out;
    }

    for result in &data.results {
        if result.namespace.is_empty() {
            let _ = writeln!(out, "{} {}", result.kind, result.name);
        } else {
            let _ = writeln!(out, "{} {}/{}", result.kind, result.namespace, result.name);
        }
        write_results(&mut out, &result.results, "    ");
        if let Some(pod) = &result.pod_result {
            write_results(&mut out, &pod.results, "    ");
            for container in &pod.container_results {
                let _ = writeln!(out, "    Container {}", container.name);
                write_results(&mut out, &container.results, "        ");
            }
        }
        out.push('\n');
    }
    out
}

fn write_results(out: &mut String, results: &ResultSet, indent: &str) {
    for result in results {
        let mark = match (result.success, result.severity) {
            (true, _) => "PASS",
            (false, Severity::Danger) => "DANGER",
            (false, Severity::Warning) => "WARN",
            (false, Severity::Ignore) => "IGNORE",
        };
        let _ = writeln!(
            out,
            "{indent}[{mark}] {} ({}): {}",
            result.id, result.category, result.message
        );
    }
}

/// Write `text` to `path`, creating parent directories.
pub fn write_output(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write {path}"))
}
