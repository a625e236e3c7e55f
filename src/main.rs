//! PerfReport - average performance per position
//!
//! A CLI tool that reads CSV exports of closed tasks, averages the
//! performance score of every position and writes a sorted report.
//!
//! Exit codes:
//!   0 - Success, including runs where no input produced any data
//!   1 - Runtime error (unreadable config, report could not be written)
//!   2 - Invalid command-line usage (reported by clap)

mod analysis;
mod cli;
mod config;
mod models;
mod report;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, DEFAULT_CONFIG_FILE};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // An explicit --config must load; a broken default file only warns.
    let (mut config, config_error) = match load_config(&args) {
        Ok(config) => (config, None),
        Err(e) if args.config.is_none() => (Config::default(), Some(e)),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(args.log_level(config.general.verbose));

    if let Some(e) = config_error {
        warn!("Failed to load config, using defaults: {:#}", e);
    }

    info!("PerfReport v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_report(&args, &config) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Report failed: {:#}", e);
            eprintln!("\nError: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .perfreport.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("Created {} with default settings.", DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Aggregate the input files, print the table and save the CSV report.
///
/// Returns the process exit code.
fn run_report(args: &Args, config: &Config) -> Result<i32> {
    let aggregation = analysis::read_files(&args.files, &config.columns);

    for skipped in &aggregation.skipped {
        debug!("Skipped {}: {}", skipped.path.display(), skipped.reason);
    }
    debug!(
        "{} rows accepted, {} rows dropped",
        aggregation.rows_accepted, aggregation.rows_dropped
    );

    let grouping = aggregation.into_grouping();
    for (position, values) in grouping.iter() {
        debug!("{}: {} value(s)", position, values.len());
    }

    let averages = report::compute_averages(grouping);

    if averages.is_empty() {
        println!("No data to report.");
        return Ok(0);
    }

    print!(
        "{}",
        report::render_table(&averages, config.report.table_precision)
    );

    let csv_file = report::write_report(args.report_name(), &averages, config.report.csv_precision)?;
    println!("Saved CSV report: {}", csv_file.display());

    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    Ok(Config::load_default()?.unwrap_or_default())
}
