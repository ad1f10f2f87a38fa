// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Per-month records derived by the engine.
//!
//! All records are recomputed from scratch on every run and never updated
//! in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Mark-to-market of the hedge book at one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyMarkToMarket {
    /// Base tier swap (EUR)
    pub base_swap_mtm: f64,

    /// Base tier call + put, net of upfront cost (EUR)
    pub base_options_mtm: f64,

    /// Shock tier swap-like leg (EUR), zero outside the Advanced scenario
    pub shock_swap_mtm: f64,

    /// Shock tier barrier options, net of upfront cost (EUR)
    pub shock_options_mtm: f64,

    /// Carry cost accrued since inception, base + shock (EUR)
    pub carry_cost_accrued: f64,

    /// Sum of the four MtM legs minus accrued carry (EUR)
    pub total_mtm: f64,
}

impl MonthlyMarkToMarket {
    /// Swap legs of both tiers
    pub fn swap_mtm(&self) -> f64 {
        self.base_swap_mtm + self.shock_swap_mtm
    }

    /// Option legs of both tiers
    pub fn options_mtm(&self) -> f64 {
        self.base_options_mtm + self.shock_options_mtm
    }
}

/// Month-over-month change of the hedge book
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PnLComponent {
    pub swap_payoff: f64,
    pub option_payoff: f64,
    /// Negative while carry keeps accruing
    pub carry_pnl: f64,
    pub net_pnl: f64,
}

/// Consumer savings against the standard market offer for one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsRecord {
    pub date: NaiveDate,

    /// Savings of the whole pool this month (EUR, never negative)
    pub monthly_saving: f64,

    /// Running total of `monthly_saving` (EUR)
    pub cumulative_saving: f64,

    /// Commission earned on this month's savings (EUR)
    pub monthly_commission: f64,

    /// Running total of `monthly_commission` (EUR)
    pub cumulative_commission: f64,

    /// Standard market price (EUR/MWh)
    pub market_price: f64,

    /// Price offered to the pool (EUR/MWh)
    pub offered_price: f64,
}

/// Premia paid at inception, per MWh of hedged consumption
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionPrices {
    pub call: f64,
    pub put: f64,
    pub barrier_call: f64,
    pub barrier_put: f64,
}
