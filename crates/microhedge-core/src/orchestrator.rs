// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Composes the engine components into one pure simulation run.
//!
//! A run validates its inputs, estimates volatility over the whole series,
//! fixes the first spot price as contract/strike price, values the hedge,
//! computes consumer savings and finally aggregates the business P&L. Nothing
//! is retained between runs: calling [`SimulationOrchestrator::run`] again with
//! new inputs recomputes everything.

use crate::error::{EngineError, Result};
use crate::hedging::{HedgeInputs, HedgeStructure, HedgingResult, HedgingSimulator};
use crate::pricing::{ContractPricer, MarketBenchmark};
use crate::result::{
    HedgingStats, MonthlyBusinessRow, PriceComparison, SimulationResult, SimulationSummary,
};
use crate::savings::SavingsCalculator;
use crate::validation::Validate;
use crate::volatility::VolatilityEstimator;
use microhedge_types::{HedgingScenario, PriceSeries, SavingsRecord, SimulationParameters};
use tracing::{debug, info, warn};

/// Run one simulation with the default market benchmark and hedge structure
pub fn run(
    series: &PriceSeries,
    parameters: &SimulationParameters,
    scenario: HedgingScenario,
) -> Result<SimulationResult> {
    SimulationOrchestrator::default().run(series, parameters, scenario)
}

/// Engine entry point holding the model constants
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationOrchestrator {
    pricer: ContractPricer,
    estimator: VolatilityEstimator,
    hedging: HedgingSimulator,
    savings: SavingsCalculator,
}

impl SimulationOrchestrator {
    pub fn new(benchmark: MarketBenchmark, structure: HedgeStructure) -> Self {
        let pricer = ContractPricer::new(benchmark);
        Self {
            pricer,
            estimator: VolatilityEstimator::monthly(),
            hedging: HedgingSimulator::new(structure),
            savings: SavingsCalculator::new(pricer),
        }
    }

    pub fn pricer(&self) -> &ContractPricer {
        &self.pricer
    }

    pub fn hedge_structure(&self) -> &HedgeStructure {
        self.hedging.structure()
    }

    /// Run the full pipeline over one series and parameter snapshot
    pub fn run(
        &self,
        series: &PriceSeries,
        parameters: &SimulationParameters,
        scenario: HedgingScenario,
    ) -> Result<SimulationResult> {
        parameters.validate()?;
        series.validate()?;

        let prices = series.prices();
        let contract_price = series.first_price().ok_or(EngineError::EmptySeries)?;

        let volatility = self.floored_volatility(&prices);

        let price_comparisons: Vec<PriceComparison> = series
            .points()
            .iter()
            .map(|point| PriceComparison {
                date: point.date,
                spot_price: point.spot_price,
                standard_price: self.pricer.standard_price(point.spot_price),
                offered_price: self.pricer.offered_price(point.spot_price, scenario),
            })
            .collect();

        let total_consumption_mwh = parameters.total_consumption_mwh();

        let hedging = self.hedging.simulate(&HedgeInputs {
            prices: &prices,
            contract_price,
            total_consumption_mwh,
            time_to_maturity: parameters.time_to_maturity_years,
            risk_free_rate: parameters.risk_free_rate,
            volatility,
            annual_carry_rate: parameters.annual_carry_rate(),
            scenario,
        });

        let savings = self.savings.compute(
            series,
            parameters.avg_consumption_mwh(),
            parameters.num_consumers,
            parameters.savings_commission_percent,
            scenario,
        );

        let business_rows = business_rows(
            &price_comparisons,
            &hedging,
            &savings,
            total_consumption_mwh,
            parameters.premium_percent,
        );

        let hedging_stats = hedging_stats(&price_comparisons);
        let summary = summarize(volatility, parameters, &hedging, &savings, &business_rows);

        let result = SimulationResult {
            scenario,
            parameters: parameters.clone(),
            contract_price,
            summary,
            hedging_stats,
            option_prices: hedging.option_prices,
            price_comparisons,
            monthly_mtm: hedging.monthly_mtm,
            pnl_components: hedging.pnl_components,
            savings,
            business_rows,
        };

        if let Some(field) = result.first_non_finite() {
            return Err(EngineError::NonFiniteOutput { field });
        }

        info!(
            %scenario,
            months = result.months(),
            volatility,
            total_profit = result.summary.total_profit,
            total_savings = result.summary.total_savings,
            "Simulation complete"
        );

        Ok(result)
    }

    /// Annualized volatility, raised to the hedge structure's floor when degenerate
    fn floored_volatility(&self, prices: &[f64]) -> f64 {
        let estimated = self.estimator.annualized(prices);
        let floor = self.hedging.structure().min_volatility;

        if estimated < floor {
            warn!(
                estimated,
                floor, "Volatility below floor, using floor for option valuation"
            );
            floor
        } else {
            debug!(volatility = estimated, "Estimated annualized volatility");
            estimated
        }
    }
}

/// Premium, hedging P&L and commission for every month after inception
///
/// Month `i` takes hedging P&L entry `i - 1`, the change from month `i - 1`
/// to month `i`.
fn business_rows(
    comparisons: &[PriceComparison],
    hedging: &HedgingResult,
    savings: &[SavingsRecord],
    total_consumption_mwh: f64,
    premium_percent: f64,
) -> Vec<MonthlyBusinessRow> {
    let mut cumulative = 0.0;

    comparisons
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, comparison)| {
            let premium_revenue =
                comparison.offered_price * total_consumption_mwh * premium_percent / 100.0;
            let component = hedging.pnl_components[i - 1];
            let commission_revenue = savings[i].monthly_commission;

            let business_pnl = premium_revenue + component.net_pnl + commission_revenue;
            cumulative += business_pnl;

            MonthlyBusinessRow {
                date: comparison.date,
                spot_price: comparison.spot_price,
                offered_price: comparison.offered_price,
                hedging_mtm: hedging.monthly_mtm[i].total_mtm,
                hedging_pnl: component.net_pnl,
                business_pnl,
                cumulative_business_pnl: cumulative,
                swap_payoff: component.swap_payoff,
                option_payoff: component.option_payoff,
                carry_pnl: component.carry_pnl,
                premium_revenue,
                commission_revenue,
            }
        })
        .collect()
}

fn hedging_stats(comparisons: &[PriceComparison]) -> HedgingStats {
    let standard: Vec<f64> = comparisons.iter().map(|c| c.standard_price).collect();
    let offered: Vec<f64> = comparisons.iter().map(|c| c.offered_price).collect();

    let peak_standard = standard.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let peak_offered = offered.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let peak_reduction_percent = if peak_standard > 0.0 && peak_offered.is_finite() {
        (peak_standard - peak_offered) / peak_standard * 100.0
    } else {
        0.0
    };

    HedgingStats {
        std_dev_standard: VolatilityEstimator::std_dev(&standard),
        std_dev_offered: VolatilityEstimator::std_dev(&offered),
        volatility_reduction_percent: VolatilityEstimator::reduction_percent(&standard, &offered),
        peak_reduction_percent,
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}

fn summarize(
    volatility: f64,
    parameters: &SimulationParameters,
    hedging: &HedgingResult,
    savings: &[SavingsRecord],
    rows: &[MonthlyBusinessRow],
) -> SimulationSummary {
    let total_profit = rows.last().map_or(0.0, |r| r.cumulative_business_pnl);
    let initial_investment = hedging.total_cost;
    let profit_margin_percent = if rows.is_empty() || initial_investment <= 0.0 {
        0.0
    } else {
        total_profit / initial_investment * 100.0
    };

    let total_savings = savings.last().map_or(0.0, |r| r.cumulative_saving);
    let savings_commission = savings.last().map_or(0.0, |r| r.cumulative_commission);
    let total_client_value = total_savings - savings_commission;

    SimulationSummary {
        volatility,
        total_revenue: total_profit,
        avg_monthly_premium: mean(rows.iter().map(|r| r.premium_revenue)),
        profit_margin_percent,
        options_cost_per_mwh: hedging.option_prices.call + hedging.option_prices.put,
        initial_investment,
        hedging_mtm: hedging.final_mtm(),
        total_savings,
        avg_savings_per_consumer: total_savings / f64::from(parameters.num_consumers),
        avg_monthly_savings: mean(savings.iter().map(|r| r.monthly_saving)),
        avg_savings_percent: mean(
            savings
                .iter()
                .map(|r| (r.market_price - r.offered_price) / r.market_price * 100.0),
        ),
        total_profit,
        total_client_value,
        savings_commission,
        total_ecosystem_value: total_profit + total_client_value,
    }
}
