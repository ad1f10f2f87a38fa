// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Error types for the pricing engine

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("price series is empty")]
    EmptySeries,

    #[error("spot price at index {index} must be positive and finite, got {price}")]
    NonPositivePrice { index: usize, price: f64 },

    #[error("price dates must be strictly increasing (violated at index {index})")]
    UnorderedDates { index: usize },

    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("computation produced a non-finite value in {field}")]
    NonFiniteOutput { field: &'static str },
}

pub type Result<T> = std::result::Result<T, EngineError>;
