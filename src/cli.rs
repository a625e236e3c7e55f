//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// PerfReport - average performance per position across CSV exports
///
/// Reads CSV files with `position` and `performance` columns, prints the
/// average performance of every position (highest first) and saves the
/// same table as `<REPORT>.csv`.
///
/// Examples:
///   perfreport --files q1.csv q2.csv --report performance
///   perfreport -f tasks.csv -r team --verbose
///   perfreport --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Input CSV file(s)
    #[arg(
        short,
        long,
        value_name = "FILE",
        num_args = 1..,
        required_unless_present = "init_config"
    )]
    pub files: Vec<PathBuf>,

    /// Report name to generate (e.g. performance)
    ///
    /// The report is written to `<NAME>.csv`, replacing any existing file.
    #[arg(
        short,
        long,
        value_name = "NAME",
        required_unless_present = "init_config"
    )]
    pub report: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .perfreport.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (warnings suppressed)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .perfreport.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the report name, empty if not set (should be validated first).
    pub fn report_name(&self) -> &str {
        self.report.as_deref().unwrap_or("")
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref config_path) = self.config {
            if !config_path.is_file() {
                return Err(format!(
                    "Config file does not exist: {}",
                    config_path.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            files: vec![PathBuf::from("a.csv")],
            report: Some("performance".to_string()),
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_files_and_report() {
        let args =
            Args::try_parse_from(["perfreport", "--files", "a.csv", "b.csv", "-r", "out"]).unwrap();

        assert_eq!(args.files, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
        assert_eq!(args.report_name(), "out");
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_files_and_report_are_required() {
        assert!(Args::try_parse_from(["perfreport", "-r", "out"]).is_err());
        assert!(Args::try_parse_from(["perfreport", "-f", "a.csv"]).is_err());
        assert!(Args::try_parse_from(["perfreport", "--init-config"]).is_ok());
    }

    #[test]
    fn test_validation_accepts_empty_report_name() {
        let mut args = make_args();
        args.report = Some(String::new());
        assert!(args.validate().is_ok());
        assert_eq!(args.report_name(), "");
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_config() {
        let mut args = make_args();
        args.config = Some(PathBuf::from("/nonexistent/.perfreport.toml"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(false), tracing::Level::INFO);
        assert_eq!(args.log_level(true), tracing::Level::DEBUG);

        args.verbose = true;
        assert_eq!(args.log_level(false), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(true), tracing::Level::ERROR);
    }
}
