// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! # MicroHedge Engine
//!
//! Financial simulation for a consumer energy-hedging product. A supplier
//! fixes a contract price for a pool of consumers and hedges the exposure
//! with swaps and options; this crate values that hedge month by month over a
//! historical price series and derives consumer savings and business P&L.
//!
//! ## Components
//!
//! - [`OptionPricer`] - Black-Scholes European call and put premia
//! - [`ContractPricer`] - Market benchmark and offered contract price
//! - [`VolatilityEstimator`] - Annualized historical volatility
//! - [`HedgingSimulator`] - Two-tier hedge mark-to-market and P&L
//! - [`SavingsCalculator`] - Consumer savings and commission
//! - [`SimulationOrchestrator`] - Runs all of the above for one scenario
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use microhedge_core::run;
//! use microhedge_types::{HedgingScenario, PriceSeries, SimulationParameters};
//!
//! let series = PriceSeries::from_pairs([
//!     (NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(), 57.35),
//!     (NaiveDate::from_ymd_opt(2019, 2, 1).unwrap(), 46.665),
//!     (NaiveDate::from_ymd_opt(2019, 3, 1).unwrap(), 47.845),
//! ]);
//!
//! let result = run(&series, &SimulationParameters::default(), HedgingScenario::Base)?;
//! assert_eq!(result.pnl_components.len(), 2);
//! # Ok::<(), microhedge_core::EngineError>(())
//! ```

pub mod error;
pub mod hedging;
pub mod orchestrator;
pub mod pricing;
pub mod result;
pub mod savings;
pub mod validation;
pub mod volatility;

pub use error::{EngineError, Result};
pub use hedging::{HedgeInputs, HedgeStructure, HedgingResult, HedgingSimulator, ShockBand};
pub use orchestrator::{SimulationOrchestrator, run};
pub use pricing::{ContractPricer, MarketBenchmark, OptionPricer, norm_cdf};
pub use result::{
    HedgingStats, MonthlyBusinessRow, PriceComparison, SimulationResult, SimulationSummary,
};
pub use savings::SavingsCalculator;
pub use validation::Validate;
pub use volatility::VolatilityEstimator;
