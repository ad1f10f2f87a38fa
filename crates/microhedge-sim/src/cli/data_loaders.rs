// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Data loaders turning the supported sources into a `PriceSeries`.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use microhedge_types::{PricePoint, PriceSeries};
use rusqlite::Connection;
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::cli::config::PriceSource;
use crate::historical::Period;

/// Trait for loading monthly prices from various sources
pub trait DataLoader {
    fn load(&self) -> Result<PriceSeries>;

    /// Short label shown next to the results
    fn describe(&self) -> String;
}

/// Build the loader for a configured price source
pub fn loader_for(source: &PriceSource) -> Result<Box<dyn DataLoader>> {
    let loader: Box<dyn DataLoader> = match source {
        PriceSource::Period { period } => {
            let period: Period = period.parse()?;
            Box::new(PeriodLoader { period })
        }
        PriceSource::Csv { csv_path } => Box::new(CsvLoader::new(csv_path.clone())),
        PriceSource::Json { json_path } => Box::new(JsonLoader::new(json_path.clone())),
        PriceSource::Database { db_path } => Box::new(SqliteLoader::new(db_path.clone())),
    };
    Ok(loader)
}

fn file_label(path: &str) -> String {
    Path::new(path)
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

/// Loader for the built-in historical prices
#[derive(Debug)]
pub struct PeriodLoader {
    pub period: Period,
}

impl DataLoader for PeriodLoader {
    fn load(&self) -> Result<PriceSeries> {
        Ok(self.period.series())
    }

    fn describe(&self) -> String {
        format!("Historical ({})", self.period)
    }
}

/// Loader for CSV files with `date,price` columns
#[derive(Debug)]
pub struct CsvLoader {
    csv_path: String,
}

impl CsvLoader {
    pub fn new(csv_path: String) -> Self {
        Self { csv_path }
    }
}

impl DataLoader for CsvLoader {
    fn load(&self) -> Result<PriceSeries> {
        let file = File::open(&self.csv_path)
            .with_context(|| format!("Failed to open CSV file: {}", self.csv_path))?;

        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

        let points = reader
            .deserialize::<PricePoint>()
            .enumerate()
            .map(|(row, record)| {
                record.with_context(|| {
                    format!("Invalid row {} in CSV file: {}", row + 1, self.csv_path)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(rows = points.len(), path = %self.csv_path, "Loaded CSV prices");
        Ok(PriceSeries::new(points))
    }

    fn describe(&self) -> String {
        format!("CSV ({})", file_label(&self.csv_path))
    }
}

/// Loader for JSON files holding an array of `{date, price}` objects
#[derive(Debug)]
pub struct JsonLoader {
    json_path: String,
}

impl JsonLoader {
    pub fn new(json_path: String) -> Self {
        Self { json_path }
    }
}

impl DataLoader for JsonLoader {
    fn load(&self) -> Result<PriceSeries> {
        let content = std::fs::read_to_string(&self.json_path)
            .with_context(|| format!("Failed to read JSON file: {}", self.json_path))?;

        let series: PriceSeries = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON file: {}", self.json_path))?;

        debug!(rows = series.len(), path = %self.json_path, "Loaded JSON prices");
        Ok(series)
    }

    fn describe(&self) -> String {
        format!("JSON ({})", file_label(&self.json_path))
    }
}

/// Loader for SQLite databases with a `prices(date TEXT, price REAL)` table
#[derive(Debug)]
pub struct SqliteLoader {
    db_path: String,
}

impl SqliteLoader {
    pub fn new(db_path: String) -> Self {
        Self { db_path }
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .with_context(|| format!("Failed to open database at {}", self.db_path))
    }
}

impl DataLoader for SqliteLoader {
    fn load(&self) -> Result<PriceSeries> {
        let conn = self.connect()?;

        let mut stmt = conn
            .prepare("SELECT date, price FROM prices ORDER BY date ASC")
            .context("Database has no usable prices table")?;

        let points = stmt
            .query_map([], |row| {
                Ok(PricePoint::new(
                    row.get::<_, NaiveDate>(0)?,
                    row.get::<_, f64>(1)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("Failed to read prices from {}", self.db_path))?;

        debug!(rows = points.len(), path = %self.db_path, "Loaded database prices");
        Ok(PriceSeries::new(points))
    }

    fn describe(&self) -> String {
        format!("Database ({})", file_label(&self.db_path))
    }
}
