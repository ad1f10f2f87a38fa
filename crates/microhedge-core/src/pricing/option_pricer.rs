// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Closed-form European option valuation (Black-Scholes, no dividends).

use statrs::function::erf::erf;
use std::f64::consts::SQRT_2;

/// Standard normal cumulative distribution via the error function
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}

/// Black-Scholes pricer for the vanilla legs of the hedge
///
/// The put is always derived from the call through put-call parity, so the
/// two premia are consistent by construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionPricer;

impl OptionPricer {
    /// European call premium
    ///
    /// At or past expiry the intrinsic value is returned. A non-positive
    /// volatility before expiry collapses to the deterministic forward payoff
    /// instead of dividing by zero; callers normally floor volatility first.
    pub fn call_price(
        spot: f64,
        strike: f64,
        time_to_maturity: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> f64 {
        if time_to_maturity <= 0.0 {
            return (spot - strike).max(0.0);
        }

        let discounted_strike = strike * (-risk_free_rate * time_to_maturity).exp();
        if volatility <= 0.0 {
            return (spot - discounted_strike).max(0.0);
        }

        let sig_sqrt_t = volatility * time_to_maturity.sqrt();
        let d1 = ((spot / strike).ln()
            + (risk_free_rate + 0.5 * volatility * volatility) * time_to_maturity)
            / sig_sqrt_t;
        let d2 = d1 - sig_sqrt_t;

        (spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2)).max(0.0)
    }

    /// European put premium from put-call parity
    pub fn put_price(
        spot: f64,
        strike: f64,
        time_to_maturity: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> f64 {
        if time_to_maturity <= 0.0 {
            return (strike - spot).max(0.0);
        }

        let call = Self::call_price(spot, strike, time_to_maturity, risk_free_rate, volatility);
        (call + strike * (-risk_free_rate * time_to_maturity).exp() - spot).max(0.0)
    }

    /// Call + put on the same strike
    pub fn straddle_price(
        spot: f64,
        strike: f64,
        time_to_maturity: f64,
        risk_free_rate: f64,
        volatility: f64,
    ) -> f64 {
        Self::call_price(spot, strike, time_to_maturity, risk_free_rate, volatility)
            + Self::put_price(spot, strike, time_to_maturity, risk_free_rate, volatility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual} (tol {tol})"
        );
    }

    #[test]
    fn test_norm_cdf_reference_points() {
        assert_close(norm_cdf(0.0), 0.5, 1e-12);
        assert_close(norm_cdf(1.96), 0.975_002_104_851_780, 1e-9);
        assert_close(norm_cdf(-1.0), 0.158_655_253_931_457, 1e-9);
    }

    #[test]
    fn test_call_matches_textbook_value() {
        // Hull: S=42, K=40, r=10%, sigma=20%, T=0.5 -> c = 4.76, p = 0.81
        let call = OptionPricer::call_price(42.0, 40.0, 0.5, 0.10, 0.20);
        let put = OptionPricer::put_price(42.0, 40.0, 0.5, 0.10, 0.20);
        assert_close(call, 4.759, 1e-3);
        assert_close(put, 0.809, 1e-3);
    }

    #[test]
    fn test_put_call_parity_holds() {
        let cases = [
            (19.85, 19.85, 1.0, 0.03, 0.45),
            (120.0, 80.0, 0.25, 0.01, 1.2),
            (30.0, 55.0, 2.0, -0.005, 0.3),
            (84.67, 84.67, 0.0833, 0.03, 0.9),
        ];

        for (spot, strike, t, r, vol) in cases {
            let call = OptionPricer::call_price(spot, strike, t, r, vol);
            let put = OptionPricer::put_price(spot, strike, t, r, vol);
            let forward_gap = spot - strike * (-r * t).exp();
            assert_close(call - put, forward_gap, 1e-9);
        }
    }

    #[test]
    fn test_intrinsic_value_at_expiry() {
        assert_eq!(OptionPricer::call_price(50.0, 40.0, 0.0, 0.03, 0.4), 10.0);
        assert_eq!(OptionPricer::put_price(50.0, 40.0, 0.0, 0.03, 0.4), 0.0);
        assert_eq!(OptionPricer::call_price(30.0, 40.0, -0.1, 0.03, 0.4), 0.0);
        assert_eq!(OptionPricer::put_price(30.0, 40.0, 0.0, 0.03, 0.4), 10.0);
    }

    #[test]
    fn test_zero_volatility_is_finite() {
        let call = OptionPricer::call_price(20.0, 20.0, 1.0, 0.03, 0.0);
        let put = OptionPricer::put_price(20.0, 20.0, 1.0, 0.03, 0.0);
        assert!(call.is_finite() && put.is_finite());
        assert_close(call, 20.0 - 20.0 * (-0.03_f64).exp(), 1e-12);
        assert_close(put, 0.0, 1e-12);
    }

    #[test]
    fn test_straddle_is_sum_of_legs() {
        let straddle = OptionPricer::straddle_price(25.0, 20.0, 0.75, 0.02, 0.5);
        let call = OptionPricer::call_price(25.0, 20.0, 0.75, 0.02, 0.5);
        let put = OptionPricer::put_price(25.0, 20.0, 0.75, 0.02, 0.5);
        assert_close(straddle, call + put, 1e-12);
    }
}
