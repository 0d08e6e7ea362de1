//! The `audit` use case: load manifests, validate every object, score the result.

use crate::report::{AuditData, ClusterInfo, OUTPUT_VERSION};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use polaris_check_catalog::CheckCatalog;
use polaris_kube::KubeObject;
use polaris_settings::{Overrides, PolarisConfigV1, ResolvedConfig};
use rayon::prelude::*;
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// `.toml` is TOML; anything else is read as YAML.
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Input for the audit use case.
#[derive(Clone, Debug)]
pub struct AuditInput<'a> {
    /// Files or directories holding manifests.
    pub paths: &'a [Utf8PathBuf],
    /// Config file contents (empty string if none).
    pub config_text: &'a str,
    pub config_format: ConfigFormat,
    pub overrides: Overrides,
}

#[derive(Clone, Debug)]
pub struct AuditOutput {
    pub data: AuditData,
    pub resolved_config: ResolvedConfig,
}

/// Run the audit use case: parse config, load manifests, validate, produce the report.
pub fn run_audit(input: AuditInput<'_>, catalog: &CheckCatalog) -> anyhow::Result<AuditOutput> {
    let audit_time = OffsetDateTime::now_utc();

    let cfg = parse_config(input.config_text, input.config_format).context("parse config")?;
    let resolved = polaris_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let mut objects: Vec<KubeObject> = Vec::new();
    for path in input.paths {
        objects.extend(polaris_kube::load_path(path).with_context(|| format!("load {path}"))?);
    }
    tracing::debug!(objects = objects.len(), "loaded manifests");

    let conf = &resolved.configuration;
    let results = objects
        .par_iter()
        .map(|object| polaris_validator::validate_object(conf, catalog, object))
        .collect::<Result<Vec<_>, _>>()
        .context("validate manifests")?;

    let source_name = input
        .paths
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let mut data = AuditData {
        polaris_output_version: OUTPUT_VERSION.to_string(),
        audit_time,
        source_type: "Path".to_string(),
        display_name: source_name.clone(),
        source_name,
        cluster_info: ClusterInfo::from_objects(&objects),
        results,
        score: 0,
    };
    data.score = data.summary().score();
    tracing::info!(score = data.score, results = data.results.len(), "audit complete");

    Ok(AuditOutput {
        data,
        resolved_config: resolved,
    })
}

fn parse_config(text: &str, format: ConfigFormat) -> anyhow::Result<PolarisConfigV1> {
    if text.trim().is_empty() {
        return Ok(PolarisConfigV1::default());
    }
    match format {
        ConfigFormat::Yaml => polaris_settings::parse_config_yaml(text),
        ConfigFormat::Toml => polaris_settings::parse_config_toml(text),
    }
}

/// When the audit should fail the process.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExitPolicy {
    pub on_danger: bool,
    pub below_score: Option<u32>,
}

/// Map the report to an exit code: 3 = a danger check failed, 4 = score below threshold.
pub fn audit_exit_code(data: &AuditData, policy: ExitPolicy) -> i32 {
    if policy.on_danger && data.summary().dangers > 0 {
        return 3;
    }
    if policy.below_score.is_some_and(|min| data.score < min) {
        return 4;
    }
    0
}
