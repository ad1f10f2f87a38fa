// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Price models: option premia and the contract price offered to consumers.

mod contract;
mod option_pricer;

pub use contract::{ContractPricer, MarketBenchmark};
pub use option_pricer::{OptionPricer, norm_cdf};
