// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Volatility estimation from monthly price series.

/// Historical volatility from log-returns
///
/// Uses the population standard deviation and annualizes by the square root
/// of the sampling frequency (12 for monthly prices). Prices must be positive.
#[derive(Debug, Clone, Copy)]
pub struct VolatilityEstimator {
    periods_per_year: f64,
}

impl Default for VolatilityEstimator {
    fn default() -> Self {
        Self::monthly()
    }
}

impl VolatilityEstimator {
    pub fn monthly() -> Self {
        Self {
            periods_per_year: 12.0,
        }
    }

    pub fn with_periods_per_year(periods_per_year: f64) -> Self {
        Self { periods_per_year }
    }

    /// `ln(p[i] / p[i-1])` for every consecutive pair
    pub fn log_returns(prices: &[f64]) -> Vec<f64> {
        prices
            .windows(2)
            .map(|pair| (pair[1] / pair[0]).ln())
            .collect()
    }

    /// Population standard deviation, 0 for an empty slice
    pub fn std_dev(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        variance.sqrt()
    }

    /// Annualized volatility, 0 when fewer than two prices are available
    pub fn annualized(&self, prices: &[f64]) -> f64 {
        if prices.len() < 2 {
            return 0.0;
        }

        Self::std_dev(&Self::log_returns(prices)) * self.periods_per_year.sqrt()
    }

    /// Relative dispersion reduction of `b` against `a` in percent
    ///
    /// `(sigma_a - sigma_b) / sigma_a * 100`, or 0 when `a` has no dispersion.
    pub fn reduction_percent(a: &[f64], b: &[f64]) -> f64 {
        let sigma_a = Self::std_dev(a);
        if sigma_a <= 0.0 {
            return 0.0;
        }

        (sigma_a - Self::std_dev(b)) / sigma_a * 100.0
    }
}
