use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use fleetgen_core::GenerationTargets;
use fleetgen_generate::{GenerateOptions, GenerationEngine, GenerationError};

#[derive(Debug, Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "fleetgen", version, about = "Fleet logistics dataset generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the full dataset into a fresh run directory.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// TOML file with targets and options.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Output directory for runs; overrides the config file.
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
    /// Seed of the run; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,
    /// Only log warnings and errors.
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

/// On-disk configuration. Every field is optional; missing values fall
/// back to the engine defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    seed: Option<u64>,
    out: Option<PathBuf>,
    reference: Option<NaiveDateTime>,
    batch_rows: Option<usize>,
    targets: Option<GenerationTargets>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    init_logging(args.quiet)?;

    let config = match &args.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<FileConfig>(&contents)
                .map_err(|err| CliError::InvalidConfig(err.to_string()))?
        }
        None => FileConfig::default(),
    };

    let defaults = GenerateOptions::default();
    let options = GenerateOptions {
        out_dir: args.out.or(config.out).unwrap_or(defaults.out_dir),
        seed: args.seed.or(config.seed).unwrap_or(defaults.seed),
        reference: config.reference.unwrap_or(defaults.reference),
        batch_rows: config.batch_rows.unwrap_or(defaults.batch_rows),
    };
    let targets = config.targets.unwrap_or_default();

    let engine = GenerationEngine::new(options);
    let result = engine.run(&targets)?;

    println!("run directory: {}", result.run_dir.display());
    println!(
        "generated {} rows across {} tables in {} ms (validations {})",
        result.report.total_rows,
        result.report.tables.len(),
        result.report.duration_ms,
        if result.report.validations_passed {
            "passed"
        } else {
            "FAILED"
        }
    );

    Ok(())
}

fn init_logging(quiet: bool) -> Result<(), CliError> {
    let default_level = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}
