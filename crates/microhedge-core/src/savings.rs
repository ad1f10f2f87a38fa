// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Consumer savings and the commission earned on them.

use crate::pricing::ContractPricer;
use microhedge_types::{HedgingScenario, PriceSeries, SavingsRecord};

/// Spot above which Advanced protection caps the savings offer
const ADVANCED_CEILING_SPOT: f64 = 70.0;
/// Spot below which Advanced protection floors the savings offer
const ADVANCED_FLOOR_SPOT: f64 = 20.0;
const ADVANCED_PRICE_CAP: f64 = 60.0;
const ADVANCED_PRICE_FLOOR: f64 = 32.0;
/// Share of the market price the Advanced shortcuts may reach
const ADVANCED_MARKET_SHARE: f64 = 0.95;

/// Compares the offered price with the standard market price month by month
#[derive(Debug, Clone, Copy, Default)]
pub struct SavingsCalculator {
    pricer: ContractPricer,
}

impl SavingsCalculator {
    pub fn new(pricer: ContractPricer) -> Self {
        Self { pricer }
    }

    /// Price the pool pays in the savings comparison
    ///
    /// Advanced protection applies its own ceiling above 70 and floor below 20;
    /// everything else uses the cost-plus contract price. The result is always
    /// re-clamped below the market price.
    pub fn offered_price(&self, spot: f64, scenario: HedgingScenario) -> f64 {
        let market = self.pricer.standard_price(spot);

        let candidate = match scenario {
            HedgingScenario::Advanced if spot > ADVANCED_CEILING_SPOT => {
                ADVANCED_PRICE_CAP.min(market * ADVANCED_MARKET_SHARE)
            }
            HedgingScenario::Advanced if spot < ADVANCED_FLOOR_SPOT => {
                ADVANCED_PRICE_FLOOR.min(market * ADVANCED_MARKET_SHARE)
            }
            HedgingScenario::Base | HedgingScenario::Advanced => self.pricer.cost_plus_price(spot),
        };

        self.pricer.clamp_competitive(spot, candidate)
    }

    /// One savings record per month with running totals
    ///
    /// `avg_consumption_mwh` is the monthly consumption of one consumer.
    pub fn compute(
        &self,
        series: &PriceSeries,
        avg_consumption_mwh: f64,
        num_consumers: u32,
        commission_percent: f64,
        scenario: HedgingScenario,
    ) -> Vec<SavingsRecord> {
        let pool_mwh = avg_consumption_mwh * f64::from(num_consumers);
        let mut cumulative_saving = 0.0;
        let mut cumulative_commission = 0.0;

        series
            .points()
            .iter()
            .map(|point| {
                let market_price = self.pricer.standard_price(point.spot_price);
                let offered_price = self.offered_price(point.spot_price, scenario);

                let monthly_saving = (market_price - offered_price).max(0.0) * pool_mwh;
                let monthly_commission = if monthly_saving > 0.0 {
                    monthly_saving * commission_percent / 100.0
                } else {
                    0.0
                };

                cumulative_saving += monthly_saving;
                cumulative_commission += monthly_commission;

                SavingsRecord {
                    date: point.date,
                    monthly_saving,
                    cumulative_saving,
                    monthly_commission,
                    cumulative_commission,
                    market_price,
                    offered_price,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(prices: &[f64]) -> PriceSeries {
        PriceSeries::from_pairs(prices.iter().enumerate().map(|(i, &p)| {
            let month = u32::try_from(i % 12).unwrap() + 1;
            let year = 2021 + i32::try_from(i / 12).unwrap();
            (NaiveDate::from_ymd_opt(year, month, 1).unwrap(), p)
        }))
    }

    #[test]
    fn test_low_spot_saving_is_two_percent_of_market() {
        let calculator = SavingsCalculator::default();
        let records = calculator.compute(&series(&[10.0]), 100.0, 50, 5.0, HedgingScenario::Base);

        // market = 16.5, offered capped at 0.98 * 16.5
        let expected = 16.5 * 0.02 * 5000.0;
        assert!((records[0].monthly_saving - expected).abs() < 1e-6);
        assert!((records[0].monthly_commission - expected * 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_advanced_shortcuts() {
        let calculator = SavingsCalculator::default();

        // > 70: min(60, 0.95 * market)
        assert!((calculator.offered_price(150.0, HedgingScenario::Advanced) - 60.0).abs() < 1e-12);

        // < 20: min(32, 0.95 * market) = 0.95 * 16.5
        let low = calculator.offered_price(10.0, HedgingScenario::Advanced);
        assert!((low - 16.5 * 0.95).abs() < 1e-12);

        // In between: cost-plus
        let mid = calculator.offered_price(40.0, HedgingScenario::Advanced);
        assert!((mid - ContractPricer::default().cost_plus_price(40.0)).abs() < 1e-12);
    }

    #[test]
    fn test_cumulative_series_are_monotonic() {
        let calculator = SavingsCalculator::default();
        let prices = [
            19.82, 15.695, 18.995, 23.285, 24.93, 34.62, 40.755, 50.34, 97.775, 64.865, 92.515,
            70.345, 84.67, 98.595, 125.905, 99.45,
        ];

        for scenario in HedgingScenario::ALL {
            let records = calculator.compute(&series(&prices), 100.0, 50, 5.0, scenario);
            assert_eq!(records.len(), prices.len());

            for pair in records.windows(2) {
                assert!(pair[1].cumulative_saving >= pair[0].cumulative_saving);
                assert!(pair[1].cumulative_commission >= pair[0].cumulative_commission);
            }
            for record in &records {
                assert!(record.monthly_saving >= 0.0);
                assert!(record.offered_price <= record.market_price * 0.98);
            }
        }
    }

    #[test]
    fn test_zero_commission() {
        let calculator = SavingsCalculator::default();
        let records = calculator.compute(&series(&[30.0, 45.0]), 100.0, 10, 0.0, HedgingScenario::Base);
        assert!(records.iter().all(|r| r.monthly_commission == 0.0));
        assert!(records.iter().all(|r| r.monthly_saving > 0.0));
    }

    #[test]
    fn test_empty_series() {
        let records = SavingsCalculator::default().compute(
            &PriceSeries::default(),
            100.0,
            50,
            5.0,
            HedgingScenario::Advanced,
        );
        assert!(records.is_empty());
    }
}
