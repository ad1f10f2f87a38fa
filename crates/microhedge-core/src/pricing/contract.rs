// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Contract price offered to the consumer pool.
//!
//! The standard market price (spot plus retail markup and a fixed cost) is
//! the competitive benchmark. Every offered price is capped at a fixed
//! fraction of that benchmark, whatever scenario produced it.

use microhedge_types::HedgingScenario;
use serde::{Deserialize, Serialize};

/// Retail benchmark and cost-plus model constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketBenchmark {
    /// Retail markup over spot (decimal)
    pub market_markup: f64,

    /// Retail fixed cost (EUR/MWh)
    pub market_fixed_cost: f64,

    /// Offered price may never exceed this fraction of the market price
    pub competitiveness_ceiling: f64,

    /// Cost-plus slope on spot (alpha)
    pub cost_plus_slope: f64,

    /// Cost-plus fixed component (beta, EUR/MWh)
    pub cost_plus_intercept: f64,
}

impl Default for MarketBenchmark {
    fn default() -> Self {
        Self {
            market_markup: 0.15,
            market_fixed_cost: 5.0,
            competitiveness_ceiling: 0.98,
            cost_plus_slope: 0.65,
            cost_plus_intercept: 20.0,
        }
    }
}

/// Maps a spot price to the price offered to consumers
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractPricer {
    benchmark: MarketBenchmark,
}

impl ContractPricer {
    pub fn new(benchmark: MarketBenchmark) -> Self {
        Self { benchmark }
    }

    pub fn benchmark(&self) -> &MarketBenchmark {
        &self.benchmark
    }

    /// Standard market price: `spot * (1 + markup) + fixed cost`
    pub fn standard_price(&self, spot: f64) -> f64 {
        spot * (1.0 + self.benchmark.market_markup) + self.benchmark.market_fixed_cost
    }

    /// Highest price the pool may be offered for this spot
    pub fn competitive_ceiling(&self, spot: f64) -> f64 {
        self.standard_price(spot) * self.benchmark.competitiveness_ceiling
    }

    /// Clamp any candidate price to the competitiveness ceiling
    pub fn clamp_competitive(&self, spot: f64, candidate: f64) -> f64 {
        candidate.min(self.competitive_ceiling(spot))
    }

    /// Cost-plus price `alpha * spot + beta`, capped at the ceiling
    pub fn cost_plus_price(&self, spot: f64) -> f64 {
        let base = self.benchmark.cost_plus_slope * spot + self.benchmark.cost_plus_intercept;
        self.clamp_competitive(spot, base)
    }

    /// Offered contract price for one month
    ///
    /// Advanced protection reshapes the price in the extreme spot bands:
    ///
    /// | spot        | offered                                   |
    /// |-------------|-------------------------------------------|
    /// | > 80        | min(60, standard * 0.85)                  |
    /// | (50, 80]    | min(spot * 0.7 + 15, standard * 0.90)     |
    /// | < 15        | min(32, standard * 0.95)                  |
    /// | otherwise   | cost-plus                                 |
    pub fn offered_price(&self, spot: f64, scenario: HedgingScenario) -> f64 {
        let candidate = match scenario {
            HedgingScenario::Base => self.cost_plus_price(spot),
            HedgingScenario::Advanced => self.advanced_price(spot),
        };

        self.clamp_competitive(spot, candidate)
    }

    fn advanced_price(&self, spot: f64) -> f64 {
        let standard = self.standard_price(spot);

        if spot > 80.0 {
            60.0_f64.min(standard * 0.85)
        } else if spot > 50.0 {
            (spot * 0.7 + 15.0).min(standard * 0.90)
        } else if spot < 15.0 {
            32.0_f64.min(standard * 0.95)
        } else {
            self.cost_plus_price(spot)
        }
    }
}
