// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Business parameters for one simulation run.

use serde::{Deserialize, Serialize};

/// Immutable parameter snapshot for a single run
///
/// Defaults match the reference business case: 50 small consumers at
/// 100 MWh each, 1% premium, 5% carry and 5% savings commission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Number of consumers in the pool
    pub num_consumers: u32,

    /// Average consumption per consumer per month (kWh)
    pub avg_consumption_kwh: f64,

    /// Premium charged on the offered energy value (%)
    pub premium_percent: f64,

    /// Requested hedge coverage (0-100%)
    ///
    /// Informational: tier coverage is fixed by the hedge structure.
    pub hedging_coverage_percent: f64,

    /// Annual financing cost of the option positions (%)
    pub annual_carry_cost_percent: f64,

    /// Commission charged on realised consumer savings (0-100%)
    pub savings_commission_percent: f64,

    /// Continuously compounded risk-free rate (decimal, 0.03 = 3%)
    pub risk_free_rate: f64,

    /// Option maturity at inception (years)
    pub time_to_maturity_years: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            num_consumers: 50,
            avg_consumption_kwh: 100_000.0,
            premium_percent: 1.0,
            hedging_coverage_percent: 95.0,
            annual_carry_cost_percent: 5.0,
            savings_commission_percent: 5.0,
            risk_free_rate: 0.03,
            time_to_maturity_years: 1.0,
        }
    }
}

impl SimulationParameters {
    /// Consumption per consumer converted to MWh
    pub fn avg_consumption_mwh(&self) -> f64 {
        self.avg_consumption_kwh / 1000.0
    }

    /// Pool consumption in MWh, the notional of the hedge
    pub fn total_consumption_mwh(&self) -> f64 {
        f64::from(self.num_consumers) * self.avg_consumption_mwh()
    }

    /// Annual carry cost as a decimal rate
    pub fn annual_carry_rate(&self) -> f64 {
        self.annual_carry_cost_percent / 100.0
    }
}
