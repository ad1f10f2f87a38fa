// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use microhedge_types::SimulationParameters;

#[derive(Debug, Parser)]
#[command(name = "microhedge-sim")]
#[command(author, version, about = "MicroHedge hedging simulator CLI")]
#[command(
    long_about = "Simulate a hedged fixed-price energy contract over historical monthly prices.\n\
    \nValues the two-tier swap and option hedge month by month and reports consumer\n\
    savings, commission and business P&L for the Base or Advanced protection scenario.\n\
    \nExamples:\n  \
    microhedge-sim run                               # All 72 months, Base protection\n  \
    microhedge-sim run --period 2022 --scenario advanced\n  \
    microhedge-sim compare --period 2023-2024        # Base vs Advanced side by side\n  \
    microhedge-sim batch --config runs.toml          # Run multiple configurations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a single simulation for one scenario
    #[command(
        long_about = "Run the full pipeline for one hedging scenario.\n\
        \nData Sources (choose one):\n  \
        - Built-in: --period <name> (2019..2024, 2023-2024, all)\n  \
        - CSV: --from-csv <path> with date,price columns\n  \
        - JSON: --from-json <path> with an array of {date, price}\n  \
        - Database: --from-db <path> with a prices(date, price) table\n\
        \nExamples:\n  \
        microhedge-sim run\n  \
        microhedge-sim run --period 2021 --consumers 200 --premium 1.5\n  \
        microhedge-sim run --from-csv prices.csv --output both --csv-path months.csv"
    )]
    Run(RunArgs),

    /// Run Base and Advanced protection over the same prices
    #[command(
        long_about = "Compare Base and Advanced protection side by side.\n\
        \nBoth scenarios share the price source and business parameters.\n\
        \nExamples:\n  \
        microhedge-sim compare\n  \
        microhedge-sim compare --period 2022 --commission 10"
    )]
    Compare(CompareArgs),

    /// Run batch simulations from TOML configuration file
    #[command(
        long_about = "Execute multiple simulation runs defined in a TOML config file.\n\
        \nEvery run shares the [parameters] table and picks its own price source and\n\
        scenario. Monthly results are saved to CSV files in the output directory.\n\
        \nExamples:\n  \
        microhedge-sim batch --config runs.toml\n  \
        microhedge-sim batch --config runs.toml --output-dir ./results"
    )]
    Batch(BatchArgs),

    /// Print an example batch configuration
    ExampleConfig,
}

/// Where the monthly prices come from
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Built-in historical period
    #[arg(
        long,
        default_value = "all",
        help = "Historical period to simulate (2019..2024, 2023-2024, all)",
        long_help = "Built-in monthly gas spot prices:\n  \
          - 2019 .. 2024: a single calendar year\n  \
          - 2023-2024: the last two years\n  \
          - all: January 2019 through December 2024\n\
          \nIgnored when using --from-csv, --from-json or --from-db"
    )]
    pub period: String,

    /// Load prices from a CSV file
    #[arg(long, value_name = "PATH", help = "CSV file with date,price columns")]
    pub from_csv: Option<String>,

    /// Load prices from a JSON file
    #[arg(
        long,
        value_name = "PATH",
        help = "JSON file with an array of {date, price} objects"
    )]
    pub from_json: Option<String>,

    /// Load prices from a SQLite database
    #[arg(
        long,
        value_name = "PATH",
        help = "SQLite database with a prices(date, price) table"
    )]
    pub from_db: Option<String>,
}

/// Business parameters, defaulting to the standard pool of 50 consumers
#[derive(Debug, Clone, Args)]
pub struct ParameterArgs {
    /// Number of consumers in the pool
    #[arg(long, default_value_t = 50)]
    pub consumers: u32,

    /// Average monthly consumption per consumer in kWh
    #[arg(long, default_value_t = 100_000.0)]
    pub consumption_kwh: f64,

    /// Premium on the offered price in percent
    #[arg(long, default_value_t = 1.0)]
    pub premium: f64,

    /// Hedging coverage in percent (reported only)
    #[arg(long, default_value_t = 95.0)]
    pub coverage: f64,

    /// Annual carry cost of the hedge in percent
    #[arg(long, default_value_t = 5.0)]
    pub carry: f64,

    /// Commission on consumer savings in percent
    #[arg(long, default_value_t = 5.0)]
    pub commission: f64,

    /// Risk-free rate as a decimal
    #[arg(long, default_value_t = 0.03)]
    pub risk_free_rate: f64,

    /// Option time to maturity in years
    #[arg(long, default_value_t = 1.0)]
    pub maturity: f64,
}

impl From<&ParameterArgs> for SimulationParameters {
    fn from(args: &ParameterArgs) -> Self {
        Self {
            num_consumers: args.consumers,
            avg_consumption_kwh: args.consumption_kwh,
            premium_percent: args.premium,
            hedging_coverage_percent: args.coverage,
            annual_carry_cost_percent: args.carry,
            savings_commission_percent: args.commission,
            risk_free_rate: args.risk_free_rate,
            time_to_maturity_years: args.maturity,
        }
    }
}

#[derive(Debug, Clone, Parser)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub parameters: ParameterArgs,

    /// Hedging scenario: base or advanced
    #[arg(
        long,
        default_value = "base",
        help = "Protection level (base, advanced)",
        long_help = "Protection levels:\n  \
          - base: cost-plus pricing, swap and straddle hedge on 50% of volume\n  \
          - advanced: price bands plus a barrier shock tier on 30% of volume"
    )]
    pub scenario: String,

    /// Output format: table, csv, or both
    #[arg(long, default_value = "table",
          value_parser = ["table", "csv", "both"],
          help = "How to display results")]
    pub output: String,

    /// CSV file path (required when output is csv or both)
    #[arg(
        long,
        value_name = "PATH",
        help = "Where to save month-by-month CSV results",
        long_help = "Path for CSV export with one row per month.\n\
          Required when --output is 'csv' or 'both'.\n\
          \nExample: --csv-path months.csv"
    )]
    pub csv_path: Option<String>,

    /// Show the month-by-month table
    #[arg(long, default_value_t = false, help = "Print monthly business rows")]
    pub monthly: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct CompareArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub parameters: ParameterArgs,
}

#[derive(Debug, Clone, Parser)]
pub struct BatchArgs {
    /// Path to TOML configuration file
    #[arg(
        long,
        value_name = "PATH",
        help = "Path to batch configuration file",
        long_help = "TOML file defining the shared parameters and the runs to execute.\n\
          Print a template with `microhedge-sim example-config`.\n\
          \nExample: --config runs.toml"
    )]
    pub config: String,

    /// Output directory for CSV files (overrides config setting)
    #[arg(
        long,
        value_name = "PATH",
        help = "Directory for CSV output files",
        long_help = "Directory where CSV results will be saved.\n\
          Overrides output.csv_dir from config file if specified.\n\
          \nExample: --output-dir ./batch_results"
    )]
    pub output_dir: Option<String>,
}
