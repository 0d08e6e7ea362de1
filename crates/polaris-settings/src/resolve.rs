use crate::model::{ExemptionConfig, PolarisConfigV1};
use crate::presets;
use anyhow::Context;
use polaris_check_catalog::CheckDefinition;
use polaris_types::Severity;
use polaris_validator::{Configuration, Exemption, NamePatterns};

/// Command-line switches that take precedence over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub disallow_exemptions: Option<bool>,
    pub disallow_config_exemptions: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub configuration: Configuration,
}

pub fn resolve_config(cfg: PolarisConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let mut configuration = Configuration {
        checks: presets::default_checks(),
        ..Configuration::default()
    };

    for (check_id, severity) in &cfg.checks {
        let severity = parse_severity(severity)
            .with_context(|| format!("invalid severity for {check_id}"))?;
        configuration.checks.insert(check_id.clone(), severity);
    }

    for (check_id, spec) in cfg.custom_checks {
        let definition = CheckDefinition::from_spec(&check_id, spec)
            .with_context(|| format!("invalid custom check {check_id}"))?;
        configuration.custom_checks.insert(check_id, definition);
    }

    configuration.exemptions = cfg
        .exemptions
        .into_iter()
        .enumerate()
        .map(|(i, e)| resolve_exemption(e).with_context(|| format!("invalid exemption #{i}")))
        .collect::<anyhow::Result<_>>()?;

    configuration.disallow_exemptions = overrides
        .disallow_exemptions
        .or(cfg.disallow_exemptions)
        .unwrap_or(false);
    configuration.disallow_config_exemptions = overrides
        .disallow_config_exemptions
        .or(cfg.disallow_config_exemptions)
        .unwrap_or(false);

    Ok(ResolvedConfig { configuration })
}

fn resolve_exemption(cfg: ExemptionConfig) -> anyhow::Result<Exemption> {
    Ok(Exemption {
        namespace: cfg.namespace,
        controller_names: NamePatterns::new(cfg.controller_names)
            .context("invalid controllerNames glob")?,
        container_names: NamePatterns::new(cfg.container_names)
            .context("invalid containerNames glob")?,
        rules: cfg.rules,
    })
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "ignore" => Ok(Severity::Ignore),
        "warning" | "warn" => Ok(Severity::Warning),
        "danger" | "error" => Ok(Severity::Danger),
        other => anyhow::bail!("unknown severity: {other} (expected ignore|warning|danger)"),
    }
}
