//! Developer tasks (schema generation, catalog verification, config fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use polaris_check_catalog::{BUILTIN_CHECK_ORDER, CheckCatalog};
use schemars::schema_for;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };
    if manifest_dir.ends_with("xtask") {
        return manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask has no parent directory");
    }
    Ok(manifest_dir)
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

fn config_fixtures_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("tests").join("fixtures").join("configs"))
}

fn builtin_checks_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?
        .join("crates")
        .join("polaris-check-catalog")
        .join("checks"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(polaris_settings::PolarisConfigV1)
}

fn generate_check_schema() -> schemars::Schema {
    schema_for!(polaris_check_catalog::CheckSpec)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "polaris.config.v1.json",
            generate: generate_config_schema,
        },
        SchemaSpec {
            filename: "polaris.check.v1.json",
            generate: generate_check_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas/ matches what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut stale = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        let expected = serialize_schema(&(spec.generate)())?;
        match fs::read_to_string(&path) {
            Ok(actual) if actual == expected => {}
            Ok(_) => stale.push(format!("{} (out of date)", spec.filename)),
            Err(_) => stale.push(format!("{} (missing)", spec.filename)),
        }
    }

    if stale.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    eprintln!("Schemas needing regeneration:");
    for name in &stale {
        eprintln!("  - {name}");
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Every embedded definition decodes and compiles, and the check files on disk match the
/// declared evaluation order exactly.
fn check_catalog() -> anyhow::Result<()> {
    let catalog = CheckCatalog::builtin().context("load built-in catalog")?;
    println!("✓ {} built-in checks decode and compile", catalog.len());

    let mut errors = Vec::new();
    for id in BUILTIN_CHECK_ORDER {
        if polaris_settings::default_severity(id).is_none() {
            errors.push(format!("{id}: no default severity"));
        }
    }

    let dir = builtin_checks_dir()?;
    let on_disk: BTreeSet<String> = fs::read_dir(&dir)
        .with_context(|| format!("read {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let path = entry.path();
            (path.extension().is_some_and(|ext| ext == "yaml"))
                .then(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
                .flatten()
        })
        .collect();
    let declared: BTreeSet<String> = BUILTIN_CHECK_ORDER.iter().map(|s| s.to_string()).collect();
    for extra in on_disk.difference(&declared) {
        errors.push(format!("{extra}.yaml is not in the declared check order"));
    }
    for missing in declared.difference(&on_disk) {
        errors.push(format!("{missing}: no {missing}.yaml in {}", dir.display()));
    }

    if errors.is_empty() {
        println!("✓ check files match the declared order");
        return Ok(());
    }
    for err in &errors {
        eprintln!("  ✗ {err}");
    }
    bail!("{} catalog problem(s)", errors.len())
}

/// Validate every config fixture against the generated config schema and resolve it.
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_config_schema()).context("schema to JSON")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile config schema: {e}"))?;

    let dir = config_fixtures_dir()?;
    let mut entries: Vec<PathBuf> = fs::read_dir(&dir)
        .with_context(|| format!("read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    let mut errors = Vec::new();
    for path in &entries {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let text = fs::read_to_string(path).with_context(|| format!("read {name}"))?;
        let is_toml = path.extension().is_some_and(|ext| ext == "toml");

        let value: serde_json::Value = if is_toml {
            toml::from_str(&text).with_context(|| format!("parse {name} as TOML"))?
        } else {
            serde_yaml::from_str(&text).with_context(|| format!("parse {name} as YAML"))?
        };
        for err in validator.iter_errors(&value) {
            errors.push(format!("{name}: schema validation: {err}"));
        }

        let cfg = if is_toml {
            polaris_settings::parse_config_toml(&text)
        } else {
            polaris_settings::parse_config_yaml(&text)
        };
        if let Err(err) = cfg.and_then(|c| {
            polaris_settings::resolve_config(c, polaris_settings::Overrides::default())
        }) {
            errors.push(format!("{name}: resolve: {err:#}"));
        }
    }

    if errors.is_empty() {
        println!("✓ {} config fixture(s) conform", entries.len());
        return Ok(());
    }
    for err in &errors {
        eprintln!("  ✗ {err}");
    }
    bail!("{} conformance error(s)", errors.len())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  check-catalog     Verify built-in check definitions and their order");
    eprintln!("  conform           Validate config fixtures against the config schema");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(String::as_str).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "check-catalog" => check_catalog(),
        "conform" => conform(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
}
