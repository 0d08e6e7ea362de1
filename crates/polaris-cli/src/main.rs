//! CLI entry point for polaris.
//!
//! Handles argument parsing, I/O, logging setup and exit codes. All business logic lives
//! in the `polaris-app` crate.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use polaris_app::{
    AuditInput, ConfigFormat, ExitPolicy, audit_exit_code, format_check_list, list_checks,
    render_json, render_pretty, run_audit, write_output,
};
use polaris_check_catalog::CheckCatalog;
use polaris_settings::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "polaris",
    version,
    about = "Validate Kubernetes manifests against best-practice checks"
)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Pretty,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Audit manifest files and report check results.
    Audit {
        /// Polaris config file (YAML, or TOML with a `.toml` extension).
        #[arg(long)]
        config: Option<Utf8PathBuf>,

        /// File or directory of manifests. May be repeated.
        #[arg(long, default_value = ".")]
        audit_path: Vec<Utf8PathBuf>,

        #[arg(long, value_enum, default_value = "json")]
        format: Format,

        /// Write the report here instead of stdout.
        #[arg(long)]
        output_file: Option<Utf8PathBuf>,

        /// Ignore exemption annotations on manifests.
        #[arg(long)]
        disallow_exemptions: bool,

        /// Ignore exemptions listed in the config file.
        #[arg(long)]
        disallow_config_exemptions: bool,

        /// Exit with 3 if any danger-level check fails.
        #[arg(long)]
        set_exit_code_on_danger: bool,

        /// Exit with 4 if the score is below this value.
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
        set_exit_code_below_score: Option<u32>,
    },

    /// List the built-in checks with their default severity.
    Checks,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let catalog = CheckCatalog::builtin().context("load built-in checks")?;

    match cli.cmd {
        Commands::Audit {
            config,
            audit_path,
            format,
            output_file,
            disallow_exemptions,
            disallow_config_exemptions,
            set_exit_code_on_danger,
            set_exit_code_below_score,
        } => {
            let overrides = Overrides {
                disallow_exemptions: disallow_exemptions.then_some(true),
                disallow_config_exemptions: disallow_config_exemptions.then_some(true),
            };
            let policy = ExitPolicy {
                on_danger: set_exit_code_on_danger,
                below_score: set_exit_code_below_score,
            };
            let code = cmd_audit(
                &catalog,
                config,
                &audit_path,
                format,
                output_file,
                overrides,
                policy,
            )?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Commands::Checks => {
            print!("{}", format_check_list(&list_checks(&catalog)));
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

fn cmd_audit(
    catalog: &CheckCatalog,
    config: Option<Utf8PathBuf>,
    paths: &[Utf8PathBuf],
    format: Format,
    output_file: Option<Utf8PathBuf>,
    overrides: Overrides,
    policy: ExitPolicy,
) -> anyhow::Result<i32> {
    let (config_text, config_format) = match &config {
        Some(path) => (
            std::fs::read_to_string(path).with_context(|| format!("read config: {path}"))?,
            ConfigFormat::from_path(path),
        ),
        None => (String::new(), ConfigFormat::Yaml),
    };

    let output = run_audit(
        AuditInput {
            paths,
            config_text: &config_text,
            config_format,
            overrides,
        },
        catalog,
    )?;

    let rendered = match format {
        Format::Json => render_json(&output.data)?,
        Format::Pretty => render_pretty(&output.data),
    };
    match output_file {
        Some(path) => write_output(&path, &rendered).context("write report")?,
        None => println!("{rendered}"),
    }

    Ok(audit_exit_code(&output.data, policy))
}
