// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Built-in monthly gas spot prices and the period presets over them.

use chrono::NaiveDate;
use microhedge_types::{PricePoint, PriceSeries};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const FIRST_YEAR: i32 = 2019;
pub const LAST_YEAR: i32 = 2024;

/// Monthly average spot prices (EUR/MWh), January 2019 through December 2024
const MONTHLY_PRICES: [f64; 72] = [
    // 2019
    19.850, 17.815, 14.215, 14.390, 11.205, 10.115, 11.000, 12.795, 16.390, 16.135, 16.330, 12.050,
    // 2020
    9.755, 8.875, 6.900, 6.220, 4.385, 6.165, 6.025, 11.240, 13.285, 14.060, 15.140, 19.125,
    // 2021
    19.820, 15.695, 18.995, 23.285, 24.930, 34.620, 40.755, 50.340, 97.775, 64.865, 92.515, 70.345,
    // 2022
    84.670, 98.595, 125.905, 99.450, 94.005, 144.515, 190.915, 239.905, 188.800, 123.350,
    146.395, 76.315,
    // 2023
    57.350, 46.665, 47.845, 38.540, 26.850, 37.103, 28.365, 35.030, 41.859, 48.005, 42.090,
    32.350,
    // 2024
    30.235, 24.865, 27.340, 29.120, 34.223, 34.480, 35.870, 39.825, 39.044, 40.588, 47.811,
    48.889,
];

/// The full 72-month historical series
pub fn historical_series() -> PriceSeries {
    MONTHLY_PRICES
        .chunks(12)
        .zip(FIRST_YEAR..)
        .flat_map(|(prices, year)| {
            prices.iter().zip(1..).filter_map(move |(&price, month)| {
                NaiveDate::from_ymd_opt(year, month, 1).map(|date| PricePoint::new(date, price))
            })
        })
        .collect()
}

/// Named slice of the historical series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Period {
    /// A single calendar year
    Year(i32),
    /// 2023 and 2024
    Recent,
    #[default]
    All,
}

impl Period {
    pub fn presets() -> Vec<Self> {
        (FIRST_YEAR..=LAST_YEAR)
            .map(Self::Year)
            .chain([Self::Recent, Self::All])
            .collect()
    }

    pub fn year_range(self) -> (i32, i32) {
        match self {
            Self::Year(year) => (year, year),
            Self::Recent => (2023, 2024),
            Self::All => (FIRST_YEAR, LAST_YEAR),
        }
    }

    pub fn series(self) -> PriceSeries {
        let (from, to) = self.year_range();
        historical_series().years(from, to)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Recent => f.write_str("2023-2024"),
            Self::All => f.write_str("all"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown period '{0}' (expected 2019..2024, 2023-2024 or all)")]
pub struct ParsePeriodError(pub String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        match trimmed.as_str() {
            "all" => Ok(Self::All),
            "2023-2024" | "recent" => Ok(Self::Recent),
            other => other
                .parse::<i32>()
                .ok()
                .filter(|year| (FIRST_YEAR..=LAST_YEAR).contains(year))
                .map(Self::Year)
                .ok_or_else(|| ParsePeriodError(trimmed.clone())),
        }
    }
}
