// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Input-domain checks run before every simulation.

use crate::error::{EngineError, Result};
use microhedge_types::{PriceSeries, SimulationParameters};

/// Domain validation for engine inputs
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for SimulationParameters {
    fn validate(&self) -> Result<()> {
        if self.num_consumers == 0 {
            return Err(EngineError::InvalidParameter {
                name: "num_consumers",
                value: 0.0,
                reason: "must be at least 1",
            });
        }

        positive("avg_consumption_kwh", self.avg_consumption_kwh)?;
        non_negative("premium_percent", self.premium_percent)?;
        percentage("hedging_coverage_percent", self.hedging_coverage_percent)?;
        non_negative("annual_carry_cost_percent", self.annual_carry_cost_percent)?;
        percentage(
            "savings_commission_percent",
            self.savings_commission_percent,
        )?;
        finite("risk_free_rate", self.risk_free_rate)?;
        positive("time_to_maturity_years", self.time_to_maturity_years)?;

        Ok(())
    }
}

impl Validate for PriceSeries {
    fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(EngineError::EmptySeries);
        }

        for (index, point) in self.points().iter().enumerate() {
            if !point.spot_price.is_finite() || point.spot_price <= 0.0 {
                return Err(EngineError::NonPositivePrice {
                    index,
                    price: point.spot_price,
                });
            }
        }

        if let Some(index) = self
            .points()
            .windows(2)
            .position(|pair| pair[1].date <= pair[0].date)
        {
            return Err(EngineError::UnorderedDates { index: index + 1 });
        }

        Ok(())
    }
}

fn finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidParameter {
            name,
            value,
            reason: "must be finite",
        })
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidParameter {
            name,
            value,
            reason: "must be greater than 0",
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidParameter {
            name,
            value,
            reason: "must not be negative",
        })
    }
}

fn percentage(name: &'static str, value: f64) -> Result<()> {
    finite(name, value)?;
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::InvalidParameter {
            name,
            value,
            reason: "must be between 0 and 100",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn month(m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, m, 1).unwrap()
    }

    #[test]
    fn test_default_parameters_are_valid() {
        assert!(SimulationParameters::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_domain_parameters() {
        let zero_consumers = SimulationParameters {
            num_consumers: 0,
            ..SimulationParameters::default()
        };
        assert!(matches!(
            zero_consumers.validate(),
            Err(EngineError::InvalidParameter {
                name: "num_consumers",
                ..
            })
        ));

        let negative_load = SimulationParameters {
            avg_consumption_kwh: -5.0,
            ..SimulationParameters::default()
        };
        assert!(negative_load.validate().is_err());

        let commission = SimulationParameters {
            savings_commission_percent: 130.0,
            ..SimulationParameters::default()
        };
        assert!(commission.validate().is_err());

        let expired = SimulationParameters {
            time_to_maturity_years: 0.0,
            ..SimulationParameters::default()
        };
        assert!(expired.validate().is_err());

        let nan_rate = SimulationParameters {
            risk_free_rate: f64::NAN,
            ..SimulationParameters::default()
        };
        assert!(nan_rate.validate().is_err());
    }

    #[test]
    fn test_series_checks() {
        assert_eq!(
            PriceSeries::default().validate(),
            Err(EngineError::EmptySeries)
        );

        let negative = PriceSeries::from_pairs([(month(1), 10.0), (month(2), -1.0)]);
        assert!(matches!(
            negative.validate(),
            Err(EngineError::NonPositivePrice { index: 1, .. })
        ));

        let duplicate = PriceSeries::from_pairs([
            (month(1), 10.0),
            (month(2), 11.0),
            (month(2), 12.0),
        ]);
        assert_eq!(
            duplicate.validate(),
            Err(EngineError::UnorderedDates { index: 2 })
        );

        let fine = PriceSeries::from_pairs([(month(1), 10.0), (month(2), 11.0)]);
        assert!(fine.validate().is_ok());
    }
}
