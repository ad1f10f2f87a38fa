// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! TOML configuration file parsing for batch simulation runs.

use anyhow::{Context, Result};
use microhedge_types::{HedgingScenario, SimulationParameters};
use serde::{Deserialize, Serialize};
use std::fs;

/// Root configuration structure for batch simulations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Business parameters shared by every run
    #[serde(default)]
    pub parameters: SimulationParameters,

    /// List of runs to execute
    pub runs: Vec<RunConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Individual run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Human-readable name, also used for the CSV file name
    pub name: String,

    /// Hedging scenario for this run
    #[serde(default)]
    pub scenario: HedgingScenario,

    /// Where the prices come from
    #[serde(flatten)]
    pub source: PriceSource,
}

/// Source of the monthly prices
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PriceSource {
    /// Built-in historical period
    #[serde(rename = "period")]
    Period {
        /// Period name (2019..2024, 2023-2024, all)
        #[serde(default = "default_period")]
        period: String,
    },

    /// CSV file with date,price columns
    #[serde(rename = "csv")]
    Csv { csv_path: String },

    /// JSON array of {date, price}
    #[serde(rename = "json")]
    Json { json_path: String },

    /// SQLite database with a prices table
    #[serde(rename = "database")]
    Database { db_path: String },
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format (table, csv, both)
    #[serde(default = "default_output_format")]
    pub format: String,

    /// Directory for CSV output files
    #[serde(default = "default_csv_dir")]
    pub csv_dir: String,
}

// Default value functions
fn default_period() -> String {
    "all".to_owned()
}

fn default_output_format() -> String {
    "both".to_owned()
}

fn default_csv_dir() -> String {
    "./batch_results".to_owned()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
            csv_dir: default_csv_dir(),
        }
    }
}

impl OutputConfig {
    pub fn wants_table(&self) -> bool {
        self.format == "table" || self.format == "both"
    }

    pub fn wants_csv(&self) -> bool {
        self.format == "csv" || self.format == "both"
    }
}

impl BatchConfig {
    /// Load batch configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse TOML config: {path}"))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: BatchConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Generate example batch config as TOML string
    pub fn example_toml() -> String {
        r#"# MicroHedge Simulator - Batch Configuration Example

[parameters]
num_consumers = 50
avg_consumption_kwh = 100000.0
premium_percent = 1.0
hedging_coverage_percent = 95.0
annual_carry_cost_percent = 5.0
savings_commission_percent = 5.0
risk_free_rate = 0.03
time_to_maturity_years = 1.0

# Run 1: the energy crisis year with Base protection
[[runs]]
name = "crisis_2022_base"
scenario = "base"
type = "period"
period = "2022"

# Run 2: same year with Advanced protection
[[runs]]
name = "crisis_2022_advanced"
scenario = "advanced"
type = "period"
period = "2022"

# Run 3: prices from a CSV file
[[runs]]
name = "custom_csv"
scenario = "base"
type = "csv"
csv_path = "prices.csv"

[output]
format = "both"          # table, csv, or both
csv_dir = "./batch_results"
"#
        .to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_example_config_parses() {
        let config = BatchConfig::from_toml(&BatchConfig::example_toml()).unwrap();

        assert_eq!(config.parameters, SimulationParameters::default());
        assert_eq!(config.runs.len(), 3);
        assert_eq!(config.runs[1].scenario, HedgingScenario::Advanced);
        assert!(matches!(
            &config.runs[0].source,
            PriceSource::Period { period } if period == "2022"
        ));
        assert!(matches!(
            &config.runs[2].source,
            PriceSource::Csv { csv_path } if csv_path == "prices.csv"
        ));
        assert!(config.output.wants_table());
        assert!(config.output.wants_csv());
    }

    #[test]
    fn test_partial_parameters_fall_back_to_defaults() {
        let config = BatchConfig::from_toml(
            r#"
[parameters]
num_consumers = 200

[[runs]]
name = "only"
type = "period"
"#,
        )
        .unwrap();

        assert_eq!(config.parameters.num_consumers, 200);
        assert!((config.parameters.avg_consumption_kwh - 100_000.0).abs() < f64::EPSILON);
        assert_eq!(config.runs[0].scenario, HedgingScenario::Base);
        assert!(matches!(
            &config.runs[0].source,
            PriceSource::Period { period } if period == "all"
        ));
        assert_eq!(config.output.csv_dir, "./batch_results");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[[runs]]\nname = \"legacy\"\nscenario = \"extreme\"\ntype = \"json\"\njson_path = \"p.json\"\n\n[output]\nformat = \"table\"\n"
        )
        .unwrap();

        let config = BatchConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.runs[0].scenario, HedgingScenario::Advanced);
        assert!(config.output.wants_table());
        assert!(!config.output.wants_csv());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = BatchConfig::from_file("/nonexistent/runs.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/runs.toml"));
    }
}
