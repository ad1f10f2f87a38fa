// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! CLI entry point for the MicroHedge simulator

use anyhow::{Context, Result};
use clap::Parser;
use microhedge_sim::cli::{
    BatchArgs, BatchConfig, Cli, Commands, CompareArgs, CsvFormatter, DataLoader, PriceSource,
    RunArgs, SourceArgs, TableFormatter, loader_for,
};
use microhedge_types::{HedgingScenario, SimulationParameters};
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("microhedge_sim=info,microhedge_core=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_command(&args),
        Commands::Compare(args) => compare_command(&args),
        Commands::Batch(args) => batch_command(&args),
        Commands::ExampleConfig => {
            print!("{}", BatchConfig::example_toml());
            Ok(())
        }
    }
}

fn run_command(args: &RunArgs) -> Result<()> {
    let output_mode = args.output.as_str();
    if (output_mode == "csv" || output_mode == "both") && args.csv_path.is_none() {
        anyhow::bail!("--csv-path is required when --output is 'csv' or 'both'");
    }

    let scenario: HedgingScenario = args.scenario.parse()?;
    let parameters = SimulationParameters::from(&args.parameters);
    let loader = source_loader(&args.source)?;
    let series = loader.load()?;

    let result = microhedge_core::run(&series, &parameters, scenario)
        .with_context(|| format!("Simulation failed for {}", loader.describe()))?;

    if output_mode == "table" || output_mode == "both" {
        println!("\n{}", TableFormatter::format_summary(&result, &loader.describe()));
        if args.monthly {
            println!("{}", TableFormatter::format_monthly(&result));
        }
    }

    if let Some(csv_path) = args.csv_path.as_deref()
        && output_mode != "table"
    {
        CsvFormatter::write_monthly(&result, csv_path)
            .with_context(|| format!("Failed to write CSV to {csv_path}"))?;
        println!("CSV exported to: {csv_path}");
    }

    Ok(())
}

fn compare_command(args: &CompareArgs) -> Result<()> {
    let parameters = SimulationParameters::from(&args.parameters);
    let loader = source_loader(&args.source)?;
    let series = loader.load()?;

    let base = microhedge_core::run(&series, &parameters, HedgingScenario::Base)
        .context("Base protection simulation failed")?;
    let advanced = microhedge_core::run(&series, &parameters, HedgingScenario::Advanced)
        .context("Advanced protection simulation failed")?;

    println!("\nSource: {} | Months: {}", loader.describe(), base.months());
    println!("{}", TableFormatter::format_comparison(&base, &advanced));

    Ok(())
}

fn batch_command(args: &BatchArgs) -> Result<()> {
    if !Path::new(&args.config).exists() {
        anyhow::bail!(
            "Configuration file not found: {}\n\n\
            Create one with `microhedge-sim example-config > runs.toml`.",
            args.config
        );
    }

    let config = BatchConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load batch config from {}", args.config))?;

    let output_dir = args.output_dir.as_ref().unwrap_or(&config.output.csv_dir);
    if config.output.wants_csv() {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create output directory: {output_dir}"))?;
    }

    info!(runs = config.runs.len(), "Running batch simulation");

    let mut completed = 0;
    for (idx, run) in config.runs.iter().enumerate() {
        println!(
            "[{}/{}] Running: {} ({})",
            idx + 1,
            config.runs.len(),
            run.name,
            run.scenario
        );

        let outcome = loader_for(&run.source).and_then(|loader| {
            let series = loader.load()?;
            let result = microhedge_core::run(&series, &config.parameters, run.scenario)?;

            if config.output.wants_table() {
                println!("{}", TableFormatter::format_summary(&result, &loader.describe()));
            }
            if config.output.wants_csv() {
                let csv_path = format!("{}/{}.csv", output_dir, run.name);
                CsvFormatter::write_monthly(&result, &csv_path)?;
            }
            Ok(())
        });

        match outcome {
            Ok(()) => {
                completed += 1;
                println!("  ✓ Completed\n");
            }
            Err(e) => {
                warn!(run = %run.name, error = %e, "Batch run failed");
                eprintln!("  ✗ Failed: {e:#}\n");
            }
        }
    }

    println!("Batch complete: {completed}/{} runs succeeded", config.runs.len());
    if config.output.wants_csv() {
        println!("Results saved to: {output_dir}");
    }

    Ok(())
}

/// Resolve the single price source selected on the command line
fn source_loader(args: &SourceArgs) -> Result<Box<dyn DataLoader>> {
    let files = [
        args.from_csv.as_ref(),
        args.from_json.as_ref(),
        args.from_db.as_ref(),
    ];

    if files.iter().flatten().count() > 1 {
        anyhow::bail!(
            "Conflicting data sources. Please use only one of: --from-csv, --from-json, --from-db, or --period (default)."
        );
    }

    for path in files.into_iter().flatten() {
        if !Path::new(path).exists() {
            anyhow::bail!("Price file not found: {path}\n\nPlease check the path and try again.");
        }
    }

    let source = if let Some(csv_path) = &args.from_csv {
        PriceSource::Csv {
            csv_path: csv_path.clone(),
        }
    } else if let Some(json_path) = &args.from_json {
        PriceSource::Json {
            json_path: json_path.clone(),
        }
    } else if let Some(db_path) = &args.from_db {
        PriceSource::Database {
            db_path: db_path.clone(),
        }
    } else {
        PriceSource::Period {
            period: args.period.clone(),
        }
    };

    loader_for(&source)
}
