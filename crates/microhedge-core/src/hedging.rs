// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Monthly mark-to-market of the two-tier hedge.
//!
//! The hedge protecting the contract price has two layers:
//!
//! - **Base tier**: a swap plus an at-the-money call and put on a fixed share
//!   of pool consumption, active in every scenario.
//! - **Shock tier**: an extra share of consumption protected by simplified
//!   barrier options, active only under Advanced protection. Barrier options
//!   are priced as a flat fraction of the vanilla premium, and their value
//!   beyond a barrier follows an exponentially damped adjustment. This is a
//!   deliberate approximation of barrier pricing.
//!
//! Each month is valued independently from the contract price and the time
//! elapsed since inception; only the P&L series depends on consecutive months.

use crate::pricing::OptionPricer;
use microhedge_types::{HedgingScenario, MonthlyMarkToMarket, OptionPrices, PnLComponent};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tier sizes, barriers and approximation constants of the hedge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HedgeStructure {
    /// Share of consumption covered by the base tier (%)
    pub base_coverage_percent: f64,

    /// Share of consumption covered by the shock tier under Advanced protection (%)
    pub shock_coverage_percent: f64,

    /// Upper barrier (EUR/MWh)
    pub upper_barrier: f64,

    /// Lower barrier (EUR/MWh)
    pub lower_barrier: f64,

    /// Barrier option premium as a fraction of the vanilla premium
    pub barrier_option_multiplier: f64,

    /// Fraction of spot paid out per MWh by a triggered barrier option before expiry
    pub barrier_payout_factor: f64,

    /// Months from inception until the options expire
    pub months_to_expiry: u32,

    /// Volatility floor applied before option valuation
    pub min_volatility: f64,
}

impl Default for HedgeStructure {
    fn default() -> Self {
        Self {
            base_coverage_percent: 50.0,
            shock_coverage_percent: 30.0,
            upper_barrier: 70.0,
            lower_barrier: 20.0,
            barrier_option_multiplier: 0.6,
            barrier_payout_factor: 0.2,
            months_to_expiry: 12,
            min_volatility: 1e-4,
        }
    }
}

/// Price band driving the shock tier coverage multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShockBand {
    /// Above 90
    Severe,
    /// Above 60
    High,
    /// Above 40
    Elevated,
    /// 40 and below, no dynamic coverage
    Inactive,
}

impl ShockBand {
    pub fn for_price(price: f64) -> Self {
        if price > 90.0 {
            Self::Severe
        } else if price > 60.0 {
            Self::High
        } else if price > 40.0 {
            Self::Elevated
        } else {
            Self::Inactive
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Self::Severe => 1.4,
            Self::High => 1.2,
            Self::Elevated => 1.0,
            Self::Inactive => 0.0,
        }
    }
}

/// Inputs of one hedging simulation
#[derive(Debug, Clone, Copy)]
pub struct HedgeInputs<'a> {
    /// Monthly spot prices, chronological
    pub prices: &'a [f64],
    /// Fixed contract price, also the strike of the base options
    pub contract_price: f64,
    /// Pool consumption (MWh)
    pub total_consumption_mwh: f64,
    /// Option maturity at inception (years)
    pub time_to_maturity: f64,
    pub risk_free_rate: f64,
    /// Annualized volatility, floored by the simulator
    pub volatility: f64,
    /// Annual carry cost (decimal)
    pub annual_carry_rate: f64,
    pub scenario: HedgingScenario,
}

/// Output of a hedging simulation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HedgingResult {
    /// One entry per input month
    pub monthly_mtm: Vec<MonthlyMarkToMarket>,
    /// One entry per month after the first
    pub pnl_components: Vec<PnLComponent>,
    pub option_prices: OptionPrices,
    /// Upfront premium of both tiers (EUR)
    pub total_cost: f64,
}

impl HedgingResult {
    /// Net P&L per month after the first
    pub fn net_pnl(&self) -> Vec<f64> {
        self.pnl_components.iter().map(|c| c.net_pnl).collect()
    }

    /// Total MtM of the final month
    pub fn final_mtm(&self) -> f64 {
        self.monthly_mtm.last().map_or(0.0, |m| m.total_mtm)
    }
}

/// Per-run constants shared by every monthly valuation
#[derive(Debug, Clone, Copy)]
struct Book {
    strike: f64,
    base_notional: f64,
    shock_notional: f64,
    base_cost: f64,
    shock_cost: f64,
    volatility: f64,
}

/// Runs the monthly mark-to-market simulation of the hedge
#[derive(Debug, Clone, Copy, Default)]
pub struct HedgingSimulator {
    structure: HedgeStructure,
}

impl HedgingSimulator {
    pub fn new(structure: HedgeStructure) -> Self {
        Self { structure }
    }

    pub fn structure(&self) -> &HedgeStructure {
        &self.structure
    }

    /// Value the hedge for every month and difference consecutive months into P&L
    pub fn simulate(&self, inputs: &HedgeInputs<'_>) -> HedgingResult {
        let s = &self.structure;
        let volatility = inputs.volatility.max(s.min_volatility);
        let strike = inputs.contract_price;

        let shock_coverage = if inputs.scenario.has_shock_tier() {
            s.shock_coverage_percent
        } else {
            0.0
        };
        let base_notional = inputs.total_consumption_mwh * s.base_coverage_percent / 100.0;
        let shock_notional = inputs.total_consumption_mwh * shock_coverage / 100.0;

        let call = OptionPricer::call_price(
            strike,
            strike,
            inputs.time_to_maturity,
            inputs.risk_free_rate,
            volatility,
        );
        let put = OptionPricer::put_price(
            strike,
            strike,
            inputs.time_to_maturity,
            inputs.risk_free_rate,
            volatility,
        );
        let option_prices = OptionPrices {
            call,
            put,
            barrier_call: call * s.barrier_option_multiplier,
            barrier_put: put * s.barrier_option_multiplier,
        };

        let book = Book {
            strike,
            base_notional,
            shock_notional,
            base_cost: (option_prices.call + option_prices.put) * base_notional,
            shock_cost: (option_prices.barrier_call + option_prices.barrier_put) * shock_notional,
            volatility,
        };
        let total_cost = book.base_cost + book.shock_cost;

        debug!(
            scenario = %inputs.scenario,
            call,
            put,
            base_cost = book.base_cost,
            shock_cost = book.shock_cost,
            "Hedge premia priced"
        );

        let monthly_mtm: Vec<MonthlyMarkToMarket> = inputs
            .prices
            .iter()
            .enumerate()
            .map(|(month, &price)| self.mark_to_market(month, price, &book, inputs))
            .collect();

        let pnl_components = monthly_mtm
            .windows(2)
            .map(|pair| pnl_between(&pair[0], &pair[1]))
            .collect();

        HedgingResult {
            monthly_mtm,
            pnl_components,
            option_prices,
            total_cost,
        }
    }

    fn mark_to_market(
        &self,
        month: usize,
        price: f64,
        book: &Book,
        inputs: &HedgeInputs<'_>,
    ) -> MonthlyMarkToMarket {
        let months_elapsed = month as f64;
        let remaining_months = (f64::from(self.structure.months_to_expiry) - months_elapsed).max(0.0);
        let remaining_time = remaining_months / 12.0;

        let base_swap_mtm = (book.strike - price) * book.base_notional;

        let base_options_mtm = if remaining_time <= 0.0 {
            let payoff = (price - book.strike).max(0.0) + (book.strike - price).max(0.0);
            payoff * book.base_notional - book.base_cost
        } else {
            OptionPricer::straddle_price(
                price,
                book.strike,
                remaining_time,
                inputs.risk_free_rate,
                book.volatility,
            ) * book.base_notional
                - book.base_cost
        };

        let (shock_swap_mtm, shock_options_mtm) = if inputs.scenario.has_shock_tier() {
            self.shock_tier_mtm(price, remaining_time, book, inputs.time_to_maturity)
        } else {
            (0.0, 0.0)
        };

        let elapsed_years = months_elapsed / 12.0;
        let carry_cost_accrued = book.base_cost * inputs.annual_carry_rate * elapsed_years
            + book.shock_cost * inputs.annual_carry_rate * elapsed_years;

        MonthlyMarkToMarket {
            base_swap_mtm,
            base_options_mtm,
            shock_swap_mtm,
            shock_options_mtm,
            carry_cost_accrued,
            total_mtm: base_swap_mtm + base_options_mtm + shock_swap_mtm + shock_options_mtm
                - carry_cost_accrued,
        }
    }

    /// Swap-like leg and barrier option value of the shock tier
    fn shock_tier_mtm(
        &self,
        price: f64,
        remaining_time: f64,
        book: &Book,
        time_to_maturity: f64,
    ) -> (f64, f64) {
        let s = &self.structure;
        let notional = book.shock_notional;
        let cost = book.shock_cost;

        if price > s.upper_barrier {
            let coverage = notional * ShockBand::for_price(price).multiplier();
            let swap = (s.upper_barrier - price) * coverage;
            let options = if remaining_time <= 0.0 {
                (price - s.upper_barrier).max(0.0) * coverage - cost
            } else {
                let distance = (price - s.upper_barrier) / s.upper_barrier;
                self.triggered_barrier_value(price, distance, notional) - cost
            };
            (swap, options)
        } else if price < s.lower_barrier {
            let swap = (s.lower_barrier - price) * notional;
            let options = if remaining_time <= 0.0 {
                (s.lower_barrier - price).max(0.0) * notional - cost
            } else {
                let distance = (s.lower_barrier - price) / s.lower_barrier;
                self.triggered_barrier_value(price, distance, notional) - cost
            };
            (swap, options)
        } else {
            // Between barriers the premium decays linearly toward expiry
            let elapsed_share = if time_to_maturity > 0.0 {
                1.0 - remaining_time / time_to_maturity
            } else {
                1.0
            };
            (0.0, -cost * elapsed_share)
        }
    }

    fn triggered_barrier_value(&self, price: f64, distance: f64, notional: f64) -> f64 {
        let adjustment = 1.0 - (-0.5 * distance.powi(2)).exp();
        adjustment * notional * price * self.structure.barrier_payout_factor
    }
}

/// P&L of moving from `previous` to `current`
///
/// Carry is a cost, so its change enters with inverted sign.
pub fn pnl_between(previous: &MonthlyMarkToMarket, current: &MonthlyMarkToMarket) -> PnLComponent {
    let swap_payoff = current.swap_mtm() - previous.swap_mtm();
    let option_payoff = current.options_mtm() - previous.options_mtm();
    let carry_pnl = previous.carry_cost_accrued - current.carry_cost_accrued;

    PnLComponent {
        swap_payoff,
        option_payoff,
        carry_pnl,
        net_pnl: swap_payoff + option_payoff + carry_pnl,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICES_2022: [f64; 12] = [
        84.670, 98.595, 125.905, 99.450, 94.005, 144.515, 190.915, 239.905, 188.800, 123.350,
        146.395, 76.315,
    ];

    fn inputs(prices: &[f64], scenario: HedgingScenario) -> HedgeInputs<'_> {
        HedgeInputs {
            prices,
            contract_price: prices[0],
            total_consumption_mwh: 5000.0,
            time_to_maturity: 1.0,
            risk_free_rate: 0.03,
            volatility: 0.6,
            annual_carry_rate: 0.05,
            scenario,
        }
    }

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_lengths() {
        let result = HedgingSimulator::default().simulate(&inputs(&PRICES_2022, HedgingScenario::Base));
        assert_eq!(result.monthly_mtm.len(), 12);
        assert_eq!(result.pnl_components.len(), 11);
        assert_eq!(result.net_pnl().len(), 11);
    }

    #[test]
    fn test_single_point_has_no_pnl() {
        let prices = [50.0];
        let result = HedgingSimulator::default().simulate(&inputs(&prices, HedgingScenario::Advanced));
        assert_eq!(result.monthly_mtm.len(), 1);
        assert!(result.pnl_components.is_empty());
    }

    #[test]
    fn test_empty_series_is_degenerate() {
        let result = HedgingSimulator::default().simulate(&HedgeInputs {
            prices: &[],
            ..inputs(&[40.0], HedgingScenario::Base)
        });
        assert!(result.monthly_mtm.is_empty());
        assert!(result.pnl_components.is_empty());
        assert_eq!(result.final_mtm(), 0.0);
    }

    #[test]
    fn test_inception_month_is_flat() {
        // At inception spot == strike, no time has passed and no carry accrued
        let result = HedgingSimulator::default().simulate(&inputs(&PRICES_2022, HedgingScenario::Base));
        let first = result.monthly_mtm[0];

        assert_eq!(first.base_swap_mtm, 0.0);
        assert_eq!(first.carry_cost_accrued, 0.0);
        assert_close(first.base_options_mtm, 0.0, 1e-6);
    }

    #[test]
    fn test_base_cost_uses_half_of_consumption() {
        let result = HedgingSimulator::default().simulate(&inputs(&PRICES_2022, HedgingScenario::Base));
        let prices = result.option_prices;

        assert_close(result.total_cost, (prices.call + prices.put) * 2500.0, 1e-6);
        assert_close(prices.barrier_call, prices.call * 0.6, 1e-12);
        assert_close(prices.barrier_put, prices.put * 0.6, 1e-12);
    }

    #[test]
    fn test_advanced_adds_shock_cost() {
        let result =
            HedgingSimulator::default().simulate(&inputs(&PRICES_2022, HedgingScenario::Advanced));
        let p = result.option_prices;
        let expected = (p.call + p.put) * 2500.0 + (p.barrier_call + p.barrier_put) * 1500.0;
        assert_close(result.total_cost, expected, 1e-6);
    }

    #[test]
    fn test_base_scenario_has_no_shock_legs() {
        let result = HedgingSimulator::default().simulate(&inputs(&PRICES_2022, HedgingScenario::Base));
        assert!(result
            .monthly_mtm
            .iter()
            .all(|m| m.shock_swap_mtm == 0.0 && m.shock_options_mtm == 0.0));
    }

    #[test]
    fn test_zero_shock_coverage_matches_base() {
        let simulator = HedgingSimulator::new(HedgeStructure {
            shock_coverage_percent: 0.0,
            ..HedgeStructure::default()
        });

        let base = simulator.simulate(&inputs(&PRICES_2022, HedgingScenario::Base));
        let advanced = simulator.simulate(&inputs(&PRICES_2022, HedgingScenario::Advanced));

        assert_eq!(base.monthly_mtm, advanced.monthly_mtm);
        assert_eq!(base.pnl_components, advanced.pnl_components);
        assert_close(base.total_cost, advanced.total_cost, 0.0);
    }

    #[test]
    fn test_upper_barrier_uses_band_multiplier() {
        let simulator = HedgingSimulator::default();
        let prices = [50.0, 95.0];
        let result = simulator.simulate(&inputs(&prices, HedgingScenario::Advanced));
        let month = result.monthly_mtm[1];

        // 95 is in the severe band: 1500 MWh * 1.4
        assert_close(month.shock_swap_mtm, (70.0 - 95.0) * 1500.0 * 1.4, 1e-9);

        let distance: f64 = (95.0 - 70.0) / 70.0;
        let adjustment = 1.0 - (-0.5 * distance * distance).exp();
        let shock_cost = (result.option_prices.barrier_call + result.option_prices.barrier_put) * 1500.0;
        assert_close(
            month.shock_options_mtm,
            adjustment * 1500.0 * 95.0 * 0.2 - shock_cost,
            1e-6,
        );
    }

    #[test]
    fn test_lower_barrier_ignores_band_multiplier() {
        let prices = [30.0, 12.0];
        let result = HedgingSimulator::default().simulate(&inputs(&prices, HedgingScenario::Advanced));
        assert_close(result.monthly_mtm[1].shock_swap_mtm, (20.0 - 12.0) * 1500.0, 1e-9);
    }

    #[test]
    fn test_between_barriers_decays_premium_linearly() {
        let prices = [40.0, 45.0, 35.0, 50.0];
        let result = HedgingSimulator::default().simulate(&inputs(&prices, HedgingScenario::Advanced));
        let shock_cost = (result.option_prices.barrier_call + result.option_prices.barrier_put) * 1500.0;

        for (month, mtm) in result.monthly_mtm.iter().enumerate() {
            let remaining = (12.0 - month as f64) / 12.0;
            assert_eq!(mtm.shock_swap_mtm, 0.0);
            assert_close(mtm.shock_options_mtm, -shock_cost * (1.0 - remaining), 1e-9);
        }
    }

    #[test]
    fn test_expiry_uses_intrinsic_value() {
        let mut prices = vec![40.0; 13];
        prices[12] = 55.0;
        let result = HedgingSimulator::default().simulate(&inputs(&prices, HedgingScenario::Base));
        let last = result.monthly_mtm[12];

        assert_close(last.base_options_mtm, 15.0 * 2500.0 - result.total_cost, 1e-6);
    }

    #[test]
    fn test_shock_tier_expiry_above_upper_barrier() {
        let mut prices = vec![40.0; 13];
        prices[12] = 95.0;
        let result = HedgingSimulator::default().simulate(&inputs(&prices, HedgingScenario::Advanced));
        let last = result.monthly_mtm[12];
        let shock_cost =
            (result.option_prices.barrier_call + result.option_prices.barrier_put) * 1500.0;

        // Severe band scales the 1500 MWh shock notional by 1.4
        assert_close(last.shock_swap_mtm, (70.0 - 95.0) * 1500.0 * 1.4, 1e-9);
        assert_close(
            last.shock_options_mtm,
            (95.0 - 70.0) * 1500.0 * 1.4 - shock_cost,
            1e-6,
        );
    }

    #[test]
    fn test_shock_tier_expiry_below_lower_barrier() {
        let mut prices = vec![40.0; 13];
        prices[12] = 12.0;
        let result = HedgingSimulator::default().simulate(&inputs(&prices, HedgingScenario::Advanced));
        let last = result.monthly_mtm[12];
        let shock_cost =
            (result.option_prices.barrier_call + result.option_prices.barrier_put) * 1500.0;

        assert_close(last.shock_swap_mtm, (20.0 - 12.0) * 1500.0, 1e-9);
        assert_close(last.shock_options_mtm, (20.0 - 12.0) * 1500.0 - shock_cost, 1e-6);
    }

    #[test]
    fn test_zero_maturity_stays_finite() {
        let prices = [40.0, 45.0, 35.0];
        let result = HedgingSimulator::default().simulate(&HedgeInputs {
            time_to_maturity: 0.0,
            ..inputs(&prices, HedgingScenario::Advanced)
        });

        assert!(result.total_cost.is_finite());
        for mtm in &result.monthly_mtm {
            assert!(mtm.shock_options_mtm.is_finite());
            assert!(mtm.total_mtm.is_finite());
        }
        assert!(result.pnl_components.iter().all(|c| c.net_pnl.is_finite()));
    }

    #[test]
    fn test_carry_accrues_linearly() {
        let result =
            HedgingSimulator::default().simulate(&inputs(&PRICES_2022, HedgingScenario::Advanced));
        for (month, mtm) in result.monthly_mtm.iter().enumerate() {
            let expected = result.total_cost * 0.05 * month as f64 / 12.0;
            assert_close(mtm.carry_cost_accrued, expected, 1e-6);
        }

        // Constant monthly carry charge
        let charge = result.total_cost * 0.05 / 12.0;
        for component in &result.pnl_components {
            assert_close(component.carry_pnl, -charge, 1e-6);
        }
    }

    #[test]
    fn test_pnl_components_sum_to_mtm_change() {
        let result =
            HedgingSimulator::default().simulate(&inputs(&PRICES_2022, HedgingScenario::Advanced));
        for (i, component) in result.pnl_components.iter().enumerate() {
            let change = result.monthly_mtm[i + 1].total_mtm - result.monthly_mtm[i].total_mtm;
            assert_close(component.net_pnl, change, 1e-6);
            assert_close(
                component.net_pnl,
                component.swap_payoff + component.option_payoff + component.carry_pnl,
                1e-9,
            );
        }
    }

    #[test]
    fn test_zero_volatility_is_floored() {
        let prices = [20.0, 20.0, 20.0];
        let result = HedgingSimulator::default().simulate(&HedgeInputs {
            volatility: 0.0,
            ..inputs(&prices, HedgingScenario::Base)
        });
        assert!(result.total_cost.is_finite());
        assert!(result.monthly_mtm.iter().all(|m| m.total_mtm.is_finite()));
    }

    #[test]
    fn test_shock_band_thresholds() {
        assert_eq!(ShockBand::for_price(90.1), ShockBand::Severe);
        assert_eq!(ShockBand::for_price(90.0), ShockBand::High);
        assert_eq!(ShockBand::for_price(60.0), ShockBand::Elevated);
        assert_eq!(ShockBand::for_price(40.0), ShockBand::Inactive);
        assert_eq!(ShockBand::Inactive.multiplier(), 0.0);
    }
}
