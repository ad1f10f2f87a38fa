// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! The result bundle handed to the presentation layer.

use chrono::NaiveDate;
use microhedge_types::{
    HedgingScenario, MonthlyMarkToMarket, OptionPrices, PnLComponent, SavingsRecord,
    SimulationParameters,
};
use serde::{Deserialize, Serialize};

/// Spot, standard and offered price of one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceComparison {
    pub date: NaiveDate,
    pub spot_price: f64,
    pub standard_price: f64,
    pub offered_price: f64,
}

/// Dispersion of the offered price against the standard market price
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HedgingStats {
    pub std_dev_standard: f64,
    pub std_dev_offered: f64,
    pub volatility_reduction_percent: f64,
    pub peak_reduction_percent: f64,
}

/// Business view of one month after inception
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBusinessRow {
    pub date: NaiveDate,
    pub spot_price: f64,
    pub offered_price: f64,
    pub hedging_mtm: f64,
    pub hedging_pnl: f64,
    pub business_pnl: f64,
    pub cumulative_business_pnl: f64,
    pub swap_payoff: f64,
    pub option_payoff: f64,
    pub carry_pnl: f64,
    pub premium_revenue: f64,
    pub commission_revenue: f64,
}

/// Scalar summary of a run (EUR unless stated)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Annualized volatility used for option valuation (after flooring)
    pub volatility: f64,
    /// Final cumulative business P&L
    pub total_revenue: f64,
    pub avg_monthly_premium: f64,
    /// Cumulative business P&L relative to the upfront hedge cost (%)
    pub profit_margin_percent: f64,
    /// Call + put premium per hedged MWh
    pub options_cost_per_mwh: f64,
    /// Upfront premium of the whole hedge
    pub initial_investment: f64,
    /// Total MtM of the last month
    pub hedging_mtm: f64,
    pub total_savings: f64,
    pub avg_savings_per_consumer: f64,
    pub avg_monthly_savings: f64,
    /// Mean discount against the market price (%)
    pub avg_savings_percent: f64,
    pub total_profit: f64,
    /// Savings kept by consumers after commission
    pub total_client_value: f64,
    pub savings_commission: f64,
    pub total_ecosystem_value: f64,
}

/// Everything one run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub scenario: HedgingScenario,
    pub parameters: SimulationParameters,
    pub contract_price: f64,
    pub summary: SimulationSummary,
    pub hedging_stats: HedgingStats,
    pub option_prices: OptionPrices,
    pub price_comparisons: Vec<PriceComparison>,
    pub monthly_mtm: Vec<MonthlyMarkToMarket>,
    pub pnl_components: Vec<PnLComponent>,
    pub savings: Vec<SavingsRecord>,
    pub business_rows: Vec<MonthlyBusinessRow>,
}

impl SimulationResult {
    /// Months covered by the run
    pub fn months(&self) -> usize {
        self.monthly_mtm.len()
    }

    pub fn cumulative_business_pnl(&self) -> Vec<f64> {
        self.business_rows
            .iter()
            .map(|r| r.cumulative_business_pnl)
            .collect()
    }

    /// Name of the first non-finite value, if any
    pub(crate) fn first_non_finite(&self) -> Option<&'static str> {
        let s = &self.summary;
        let scalars = [
            ("summary.volatility", s.volatility),
            ("summary.total_revenue", s.total_revenue),
            ("summary.avg_monthly_premium", s.avg_monthly_premium),
            ("summary.profit_margin_percent", s.profit_margin_percent),
            ("summary.options_cost_per_mwh", s.options_cost_per_mwh),
            ("summary.initial_investment", s.initial_investment),
            ("summary.hedging_mtm", s.hedging_mtm),
            ("summary.total_savings", s.total_savings),
            ("summary.avg_savings_per_consumer", s.avg_savings_per_consumer),
            ("summary.avg_monthly_savings", s.avg_monthly_savings),
            ("summary.avg_savings_percent", s.avg_savings_percent),
            ("summary.total_client_value", s.total_client_value),
            ("summary.savings_commission", s.savings_commission),
            ("summary.total_ecosystem_value", s.total_ecosystem_value),
            ("hedging_stats", self.hedging_stats.volatility_reduction_percent),
            ("hedging_stats", self.hedging_stats.peak_reduction_percent),
        ];
        if let Some((field, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Some(*field);
        }

        if self.monthly_mtm.iter().any(|m| {
            ![
                m.base_swap_mtm,
                m.base_options_mtm,
                m.shock_swap_mtm,
                m.shock_options_mtm,
                m.carry_cost_accrued,
                m.total_mtm,
            ]
            .iter()
            .all(|v| v.is_finite())
        }) {
            return Some("monthly_mtm");
        }

        if self.business_rows.iter().any(|r| {
            ![
                r.business_pnl,
                r.cumulative_business_pnl,
                r.premium_revenue,
                r.commission_revenue,
            ]
            .iter()
            .all(|v| v.is_finite())
        }) {
            return Some("business_rows");
        }

        if self
            .savings
            .iter()
            .any(|r| !r.cumulative_saving.is_finite() || !r.cumulative_commission.is_finite())
        {
            return Some("savings");
        }

        None
    }
}
