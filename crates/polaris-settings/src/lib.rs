//! Config parsing and default-severity resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{ExemptionConfig, PolarisConfigV1};
pub use presets::default_severity;
pub use resolve::{Overrides, ResolvedConfig};

/// Parse a YAML (or JSON) config document.
pub fn parse_config_yaml(input: &str) -> anyhow::Result<PolarisConfigV1> {
    if input.trim().is_empty() {
        return Ok(PolarisConfigV1::default());
    }
    let cfg: PolarisConfigV1 = serde_yaml::from_str(input)?;
    Ok(cfg)
}

/// Parse a TOML config document.
pub fn parse_config_toml(input: &str) -> anyhow::Result<PolarisConfigV1> {
    let cfg: PolarisConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the configuration the engine runs with: defaults, then file, then overrides.
pub fn resolve_config(cfg: PolarisConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
