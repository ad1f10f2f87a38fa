// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! CLI module for the simulator command-line interface.

pub mod args;
pub mod config;
pub mod data_loaders;
pub mod formatters;

pub use args::{BatchArgs, Cli, Commands, CompareArgs, ParameterArgs, RunArgs, SourceArgs};
pub use config::{BatchConfig, OutputConfig, PriceSource, RunConfig};
pub use data_loaders::{CsvLoader, DataLoader, JsonLoader, PeriodLoader, SqliteLoader, loader_for};
pub use formatters::{CsvFormatter, TableFormatter};
