// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Monthly spot price inputs.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Spot price of the underlying commodity for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Month this price belongs to (conventionally the first day of the month)
    pub date: NaiveDate,

    /// Spot price (EUR/MWh)
    #[serde(alias = "price")]
    pub spot_price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, spot_price: f64) -> Self {
        Self { date, spot_price }
    }
}

/// Chronological sequence of monthly spot prices
///
/// The series is supplied by an external feed. Ordering and positivity are
/// checked by the engine before a run, not on construction, so loaders can
/// build a series first and report every problem in one place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    /// Build a series from `(date, price)` pairs
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        Self {
            points: pairs
                .into_iter()
                .map(|(date, price)| PricePoint::new(date, price))
                .collect(),
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Spot prices in chronological order
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.spot_price).collect()
    }

    /// Dates in chronological order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// First price of the series, used as the contract/strike price
    pub fn first_price(&self) -> Option<f64> {
        self.points.first().map(|p| p.spot_price)
    }

    /// Sub-series restricted to the given calendar years (inclusive)
    pub fn years(&self, from: i32, to: i32) -> Self {
        Self {
            points: self
                .points
                .iter()
                .filter(|p| (from..=to).contains(&p.date.year()))
                .copied()
                .collect(),
        }
    }
}

impl From<Vec<PricePoint>> for PriceSeries {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<T: IntoIterator<Item = PricePoint>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 1).unwrap()
    }

    #[test]
    fn test_years_filters_inclusive_range() {
        let series = PriceSeries::from_pairs([
            (month(2022, 12), 76.315),
            (month(2023, 1), 57.350),
            (month(2024, 1), 30.235),
            (month(2025, 1), 40.0),
        ]);

        let window = series.years(2023, 2024);
        assert_eq!(window.len(), 2);
        assert_eq!(window.first_price(), Some(57.350));
    }

    #[test]
    fn test_deserializes_dashboard_shape() {
        let json = r#"[{"date":"2019-01-01","price":19.85},{"date":"2019-02-01","spot_price":17.815}]"#;
        let series: PriceSeries = serde_json::from_str(json).unwrap();

        assert_eq!(series.prices(), vec![19.85, 17.815]);
        assert_eq!(series.dates()[1], month(2019, 2));
    }
}
