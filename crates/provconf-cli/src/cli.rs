//! provconf CLI - resolve provider configuration from the command line
//!
//! Usage:
//!   provconf check --manifest manifest.yaml --values values.yaml
//!   provconf show --manifest manifest.yaml --values values.yaml --format json
//!   provconf region --values values.yaml

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use provconf_core::{
    ApiKeyLocation, ConfigStore, EnvStore, LayeredStore, MemoryStore, ProviderConfiguration,
    ProviderManifest,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;

/// provconf - Resolve provider credentials and headers from configuration
#[derive(Parser, Debug)]
#[command(name = "provconf")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub(crate) verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where configuration values come from
#[derive(clap::Args, Debug)]
struct StoreArgs {
    /// Values file(s); later files take precedence
    #[arg(long = "values", required = true)]
    values: Vec<PathBuf>,

    /// Also read values from environment variables with this prefix
    #[arg(long)]
    env_prefix: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that every declared requirement has a value
    Check {
        /// Manifest declaring security definitions and headers
        #[arg(short, long)]
        manifest: PathBuf,

        #[command(flatten)]
        store: StoreArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Only output errors (quiet mode)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show the resolved configuration
    Show {
        /// Manifest declaring security definitions and headers
        #[arg(short, long)]
        manifest: PathBuf,

        #[command(flatten)]
        store: StoreArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Don't redact resolved values (use with caution)
        #[arg(long)]
        no_redact: bool,
    },

    /// Print the configured region (empty if unset)
    Region {
        #[command(flatten)]
        store: StoreArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Failures loading CLI inputs
#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to load manifest {path}: {source}")]
    Manifest {
        path: String,
        source: provconf_core::Error,
    },
    #[error("Failed to load values {path}: {source}")]
    Values {
        path: String,
        source: provconf_core::Error,
    },
    #[error("Failed to render output: {0}")]
    Render(String),
}

const REDACTED: &str = "[REDACTED]";

/// Run the CLI with the given arguments
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    execute(cli)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // try_init: a host embedding the CLI may already own the subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn execute(cli: Cli) -> ExitCode {
    match cli.command {
        Commands::Check {
            manifest,
            store,
            format,
            quiet,
        } => cmd_check(&manifest, &store, format, quiet),

        Commands::Show {
            manifest,
            store,
            format,
            no_redact,
        } => cmd_show(&manifest, &store, format, no_redact),

        Commands::Region { store } => cmd_region(&store),
    }
}

fn load_manifest(path: &Path) -> Result<ProviderManifest, CliError> {
    ProviderManifest::from_file(path).map_err(|source| CliError::Manifest {
        path: path.display().to_string(),
        source,
    })
}

fn load_store(args: &StoreArgs) -> Result<Arc<dyn ConfigStore>, CliError> {
    let mut store = LayeredStore::new();

    // Later files win, so each one goes in front of the previous
    for path in &args.values {
        let layer = MemoryStore::from_file(path).map_err(|source| CliError::Values {
            path: path.display().to_string(),
            source,
        })?;
        store.push_front(Arc::new(layer));
    }

    if let Some(prefix) = &args.env_prefix {
        store.push_front(Arc::new(EnvStore::with_prefix(prefix)));
    }

    Ok(Arc::new(store))
}

fn load_inputs(
    manifest_path: &Path,
    args: &StoreArgs,
) -> Result<(ProviderManifest, Arc<dyn ConfigStore>), CliError> {
    Ok((load_manifest(manifest_path)?, load_store(args)?))
}

fn resolve(
    manifest: &ProviderManifest,
    store: Arc<dyn ConfigStore>,
) -> provconf_core::Result<ProviderConfiguration> {
    ProviderConfiguration::new(
        &manifest.headers,
        Some(&manifest.security_definitions),
        store,
    )
}

fn cmd_check(
    manifest_path: &Path,
    args: &StoreArgs,
    format: OutputFormat,
    quiet: bool,
) -> ExitCode {
    let (manifest, store) = match load_inputs(manifest_path, args) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            return ExitCode::from(2);
        }
    };

    match resolve(&manifest, store) {
        Ok(config) => {
            if !quiet {
                match format {
                    OutputFormat::Text => println!(
                        "{} {} resolved ({} security definition(s), {} header(s))",
                        "✓".green(),
                        manifest_path.display(),
                        config.security_definition_count(),
                        config.header_count()
                    ),
                    _ => print_status(&check_status(None), format),
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            match format {
                OutputFormat::Text => {
                    eprintln!("{} Resolution failed\n", "✗".red());
                    eprintln!("{}", e);
                }
                _ => print_status(&check_status(Some(&e)), format),
            }
            ExitCode::from(1)
        }
    }
}

/// Machine-readable outcome of `check`
fn check_status(error: Option<&provconf_core::Error>) -> serde_json::Value {
    match error {
        None => serde_json::json!({ "valid": true }),
        Some(e) => serde_json::json!({
            "valid": false,
            "error": e.to_string()
        }),
    }
}

fn render_status(status: &serde_json::Value, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(status).map_err(|e| CliError::Render(e.to_string()))
        }
        _ => serde_json::to_string(status)
            .map(|s| s + "\n")
            .map_err(|e| CliError::Render(e.to_string())),
    }
}

fn print_status(status: &serde_json::Value, format: OutputFormat) {
    match render_status(status, format) {
        Ok(out) => print!("{}", out),
        Err(e) => eprintln!("{}", e.to_string().red()),
    }
}

#[derive(Debug, Serialize, PartialEq)]
struct Summary {
    security_definitions: Vec<AuthenticatorSummary>,
    headers: Vec<HeaderSummary>,
    region: String,
}

#[derive(Debug, Serialize, PartialEq)]
struct AuthenticatorSummary {
    name: String,
    scheme: String,
    location: ApiKeyLocation,
    key: String,
    value: String,
}

#[derive(Debug, Serialize, PartialEq)]
struct HeaderSummary {
    name: String,
    value: String,
}

fn summarize(config: &ProviderConfiguration, redact: bool) -> provconf_core::Result<Summary> {
    let shown = |value: &str| {
        if redact {
            REDACTED.to_string()
        } else {
            value.to_string()
        }
    };

    let mut security_definitions: Vec<_> = config
        .security_definitions()
        .map(|(name, auth)| AuthenticatorSummary {
            name: name.to_string(),
            scheme: auth.scheme().to_string(),
            location: auth.location(),
            key: auth.key_name().to_string(),
            value: shown(&auth.credential()),
        })
        .collect();
    security_definitions.sort_by(|a, b| a.name.cmp(&b.name));

    let mut headers: Vec<_> = config
        .headers()
        .map(|(name, value)| HeaderSummary {
            name: name.to_string(),
            value: shown(value),
        })
        .collect();
    headers.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Summary {
        security_definitions,
        headers,
        region: config.region()?,
    })
}

fn render(summary: &Summary, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(summary)
            .map(|s| s + "\n")
            .map_err(|e| CliError::Render(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(summary).map_err(|e| CliError::Render(e.to_string()))
        }
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str("Security definitions:\n");
            for auth in &summary.security_definitions {
                out.push_str(&format!(
                    "  {} ({} '{}'): {}\n",
                    auth.name, auth.location, auth.key, auth.value
                ));
            }
            out.push_str("Headers:\n");
            for header in &summary.headers {
                out.push_str(&format!("  {}: {}\n", header.name, header.value));
            }
            out.push_str(&format!("Region: {}\n", summary.region));
            Ok(out)
        }
    }
}

fn cmd_show(
    manifest_path: &Path,
    args: &StoreArgs,
    format: OutputFormat,
    no_redact: bool,
) -> ExitCode {
    let (manifest, store) = match load_inputs(manifest_path, args) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            return ExitCode::from(2);
        }
    };

    let summary = match resolve(&manifest, store).and_then(|c| summarize(&c, !no_redact)) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            return ExitCode::from(1);
        }
    };

    match render(&summary, format) {
        Ok(content) => {
            print!("{}", content);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            ExitCode::from(2)
        }
    }
}

fn cmd_region(args: &StoreArgs) -> ExitCode {
    let store = match load_store(args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            return ExitCode::from(2);
        }
    };

    // No requirements declared: only the region is of interest
    let config = match resolve(&ProviderManifest::default(), store) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            return ExitCode::from(1);
        }
    };

    match config.region() {
        Ok(region) => {
            println!("{}", region);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}
