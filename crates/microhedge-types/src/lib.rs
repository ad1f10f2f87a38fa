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

//! Shared data model for the MicroHedge engine.
//!
//! Every type here is an immutable snapshot: price inputs, the business
//! parameters of one run, and the per-month records the engine derives from
//! them. None of these types carry behaviour beyond simple accessors, so the
//! presentation layer can depend on this crate without pulling in the engine.

pub mod params;
pub mod price;
pub mod records;
pub mod scenario;

pub use params::SimulationParameters;
pub use price::{PricePoint, PriceSeries};
pub use records::{MonthlyMarkToMarket, OptionPrices, PnLComponent, SavingsRecord};
pub use scenario::{HedgingScenario, ParseScenarioError};
