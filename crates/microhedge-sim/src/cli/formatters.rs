// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Output formatters for CLI simulation results.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, presets::UTF8_FULL};
use microhedge_core::{SimulationResult, SimulationSummary};
use serde::Serialize;
use std::io;

/// Formatter for pretty ASCII tables
#[derive(Debug)]
pub struct TableFormatter;

/// Formatter for CSV export
#[derive(Debug)]
pub struct CsvFormatter;

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(label).add_attribute(Attribute::Bold))
        .collect()
}

fn money(value: f64) -> Cell {
    let cell = Cell::new(format!("{value:.2}")).set_alignment(CellAlignment::Right);
    if value < 0.0 { cell.fg(Color::Red) } else { cell }
}

fn percent(value: f64) -> Cell {
    Cell::new(format!("{value:.2}%")).set_alignment(CellAlignment::Right)
}

/// Rows shared by the single-run and comparison tables
fn summary_metrics(summary: &SimulationSummary) -> Vec<(&'static str, f64, bool)> {
    vec![
        ("Annualized volatility", summary.volatility * 100.0, true),
        ("Hedge cost (initial investment)", summary.initial_investment, false),
        ("Options cost per MWh", summary.options_cost_per_mwh, false),
        ("Final hedging MtM", summary.hedging_mtm, false),
        ("Avg monthly premium", summary.avg_monthly_premium, false),
        ("Total business profit", summary.total_profit, false),
        ("Profit margin", summary.profit_margin_percent, true),
        ("Total consumer savings", summary.total_savings, false),
        ("Avg savings per consumer", summary.avg_savings_per_consumer, false),
        ("Avg monthly savings", summary.avg_monthly_savings, false),
        ("Avg savings vs market", summary.avg_savings_percent, true),
        ("Savings commission", summary.savings_commission, false),
        ("Net client value", summary.total_client_value, false),
        ("Total ecosystem value", summary.total_ecosystem_value, false),
    ]
}

impl TableFormatter {
    /// Format one run as a metric/value table
    pub fn format_summary(result: &SimulationResult, source: &str) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(header(&["Metric", "Value"]));

        for (label, value, is_percent) in summary_metrics(&result.summary) {
            let cell = if is_percent { percent(value) } else { money(value) };
            table.add_row(vec![Cell::new(label), cell]);
        }

        let stats = &result.hedging_stats;
        table.add_row(vec![
            Cell::new("Price volatility reduction"),
            percent(stats.volatility_reduction_percent),
        ]);
        table.add_row(vec![
            Cell::new("Peak price reduction"),
            percent(stats.peak_reduction_percent),
        ]);

        let mut output = table.to_string();
        output.push('\n');
        output.push_str(&format!(
            "Scenario: {} | Source: {} | Months: {} | Contract price: {:.3}\n",
            result.scenario.name(),
            source,
            result.months(),
            result.contract_price
        ));
        output.push_str(&format!(
            "Option premia per MWh: call {:.3}, put {:.3}, barrier call {:.3}, barrier put {:.3}\n",
            result.option_prices.call,
            result.option_prices.put,
            result.option_prices.barrier_call,
            result.option_prices.barrier_put
        ));
        output
    }

    /// Format Base and Advanced summaries side by side
    pub fn format_comparison(base: &SimulationResult, advanced: &SimulationResult) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(header(&[
            "Metric",
            base.scenario.name(),
            advanced.scenario.name(),
            "Difference",
        ]));

        let rows = summary_metrics(&base.summary)
            .into_iter()
            .zip(summary_metrics(&advanced.summary));

        for ((label, base_value, is_percent), (_, advanced_value, _)) in rows {
            let format = if is_percent { percent } else { money };
            table.add_row(vec![
                Cell::new(label),
                format(base_value),
                format(advanced_value),
                format(advanced_value - base_value),
            ]);
        }

        let winner = if advanced.summary.total_ecosystem_value > base.summary.total_ecosystem_value
        {
            advanced.scenario.name()
        } else {
            base.scenario.name()
        };

        let mut output = table.to_string();
        output.push('\n');
        output.push_str(&format!("Higher ecosystem value: {winner}\n"));
        output
    }

    /// Month-by-month business rows
    pub fn format_monthly(result: &SimulationResult) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(header(&[
            "Month",
            "Spot",
            "Offered",
            "Hedge MtM",
            "Hedge P&L",
            "Premium",
            "Commission",
            "Business P&L",
            "Cumulative",
        ]));

        for row in &result.business_rows {
            table.add_row(vec![
                Cell::new(row.date.format("%Y-%m")),
                money(row.spot_price),
                money(row.offered_price),
                money(row.hedging_mtm),
                money(row.hedging_pnl),
                money(row.premium_revenue),
                money(row.commission_revenue),
                money(row.business_pnl),
                money(row.cumulative_business_pnl),
            ]);
        }

        table.to_string()
    }
}

/// One CSV line per month; hedge P&L columns stay empty for the inception month
#[derive(Debug, Serialize)]
struct MonthlyCsvRow {
    date: NaiveDate,
    spot_price: f64,
    standard_price: f64,
    offered_price: f64,
    total_mtm: f64,
    swap_mtm: f64,
    options_mtm: f64,
    carry_cost_accrued: f64,
    swap_payoff: Option<f64>,
    option_payoff: Option<f64>,
    carry_pnl: Option<f64>,
    hedging_pnl: Option<f64>,
    premium_revenue: Option<f64>,
    business_pnl: Option<f64>,
    cumulative_business_pnl: Option<f64>,
    monthly_saving: f64,
    cumulative_saving: f64,
    monthly_commission: f64,
    cumulative_commission: f64,
}

impl CsvFormatter {
    /// Export the month-by-month results to a CSV file
    pub fn write_monthly(result: &SimulationResult, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create CSV file: {path}"))?;
        Self::write_monthly_to(result, file)
    }

    pub fn write_monthly_to<W: io::Write>(result: &SimulationResult, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);

        let months = result
            .price_comparisons
            .iter()
            .zip(&result.monthly_mtm)
            .zip(&result.savings)
            .enumerate();

        for (i, ((comparison, mtm), savings)) in months {
            let business = i.checked_sub(1).and_then(|k| result.business_rows.get(k));

            csv.serialize(MonthlyCsvRow {
                date: comparison.date,
                spot_price: comparison.spot_price,
                standard_price: comparison.standard_price,
                offered_price: comparison.offered_price,
                total_mtm: mtm.total_mtm,
                swap_mtm: mtm.swap_mtm(),
                options_mtm: mtm.options_mtm(),
                carry_cost_accrued: mtm.carry_cost_accrued,
                swap_payoff: business.map(|b| b.swap_payoff),
                option_payoff: business.map(|b| b.option_payoff),
                carry_pnl: business.map(|b| b.carry_pnl),
                hedging_pnl: business.map(|b| b.hedging_pnl),
                premium_revenue: business.map(|b| b.premium_revenue),
                business_pnl: business.map(|b| b.business_pnl),
                cumulative_business_pnl: business.map(|b| b.cumulative_business_pnl),
                monthly_saving: savings.monthly_saving,
                cumulative_saving: savings.cumulative_saving,
                monthly_commission: savings.monthly_commission,
                cumulative_commission: savings.cumulative_commission,
            })?;
        }

        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::historical::Period;
    use microhedge_types::{HedgingScenario, SimulationParameters};

    fn result(period: Period, scenario: HedgingScenario) -> SimulationResult {
        microhedge_core::run(&period.series(), &SimulationParameters::default(), scenario).unwrap()
    }

    #[test]
    fn test_summary_table_mentions_scenario() {
        let output = TableFormatter::format_summary(
            &result(Period::Year(2019), HedgingScenario::Base),
            "Historical (2019)",
        );

        assert!(output.contains("Total consumer savings"));
        assert!(output.contains("25813.35"));
        assert!(output.contains("Scenario: Base Protection | Source: Historical (2019) | Months: 12"));
    }

    #[test]
    fn test_comparison_table_has_both_columns() {
        let base = result(Period::Recent, HedgingScenario::Base);
        let advanced = result(Period::Recent, HedgingScenario::Advanced);
        let output = TableFormatter::format_comparison(&base, &advanced);

        assert!(output.contains("Base Protection"));
        assert!(output.contains("Advanced Protection"));
        assert!(output.contains("Higher ecosystem value:"));
    }

    #[test]
    fn test_monthly_table_skips_inception() {
        let output =
            TableFormatter::format_monthly(&result(Period::Year(2020), HedgingScenario::Base));
        assert!(!output.contains("2020-01"));
        assert!(output.contains("2020-02"));
        assert!(output.contains("2020-12"));
    }

    #[test]
    fn test_csv_has_one_row_per_month() {
        let result = result(Period::Year(2023), HedgingScenario::Advanced);
        let mut buffer = Vec::new();
        CsvFormatter::write_monthly_to(&result, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with("date,spot_price,standard_price,offered_price,total_mtm"));
        assert!(lines[1].starts_with("2023-01-01,57.35,"));
        // Inception month has no hedge P&L
        assert!(lines[1].contains(",,,,,,,"));
        assert!(!lines[2].contains(",,"));
    }

    #[test]
    fn test_csv_file_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("months.csv");
        let path = path.to_string_lossy();

        CsvFormatter::write_monthly(&result(Period::Year(2024), HedgingScenario::Base), &path)
            .unwrap();

        let mut reader = csv::Reader::from_path(&*path).unwrap();
        assert_eq!(reader.records().count(), 12);
    }
}
