//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.perfreport.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".perfreport.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Column name candidates.
    #[serde(default)]
    pub columns: ColumnConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Header names accepted for each logical column, in priority order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    #[serde(default = "default_position_columns")]
    pub position: Vec<String>,

    #[serde(default = "default_performance_columns")]
    pub performance: Vec<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            position: default_position_columns(),
            performance: default_performance_columns(),
        }
    }
}

fn default_position_columns() -> Vec<String> {
    vec!["position".to_string()]
}

fn default_performance_columns() -> Vec<String> {
    vec!["performance".to_string()]
}

/// Report formatting settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Decimal places for averages in the console table.
    #[serde(default = "default_table_precision")]
    pub table_precision: usize,

    /// Decimal places for averages in the CSV report.
    #[serde(default = "default_csv_precision")]
    pub csv_precision: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            table_precision: default_table_precision(),
            csv_precision: default_csv_precision(),
        }
    }
}

fn default_table_precision() -> usize {
    2
}

fn default_csv_precision() -> usize {
    6
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI flags only ever turn settings on; they never reset a value the
    /// config file set.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.columns.position, vec!["position"]);
        assert_eq!(config.columns.performance, vec!["performance"]);
        assert_eq!(config.report.table_precision, 2);
        assert_eq!(config.report.csv_precision, 6);
        assert!(!config.general.verbose);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
verbose = true

[columns]
position = ["position", "role"]

[report]
csv_precision = 3
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.columns.position, vec!["position", "role"]);
        assert_eq!(config.columns.performance, vec!["performance"]);
        assert_eq!(config.report.table_precision, 2);
        assert_eq!(config.report.csv_precision, 3);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_default_toml_round_trips() {
        let toml_str = Config::default_toml();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[columns]"));
        assert!(toml_str.contains("[report]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[columns\nposition = 1").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
