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

//! Command-line simulator for MicroHedge
//!
//! Thin presentation layer over `microhedge-core`: it loads monthly prices,
//! calls the engine once per scenario and renders the results.
//!
//! # Features
//!
//! - **Historical Prices**: 72 months of gas spot prices with period presets
//! - **Input Loaders**: CSV, JSON and SQLite price sources
//! - **Scenario Comparison**: Base and Advanced protection side by side
//! - **Batch Runs**: TOML-configured run lists with CSV export

pub mod cli;
pub mod historical;

pub use historical::{Period, historical_series};
