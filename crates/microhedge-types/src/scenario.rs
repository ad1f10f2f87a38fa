// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of MicroHedge.

//! Protection level selecting pricing bands and hedge tiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Protection level selecting the pricing bands and the active hedge tiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HedgingScenario {
    /// Base protection: cost-plus pricing, base hedge tier only
    #[default]
    #[serde(alias = "normal")]
    Base,

    /// Advanced protection: price-band shaping plus the barrier shock tier
    #[serde(alias = "extreme")]
    Advanced,
}

impl HedgingScenario {
    pub const ALL: [Self; 2] = [Self::Base, Self::Advanced];

    pub fn name(self) -> &'static str {
        match self {
            Self::Base => "Base Protection",
            Self::Advanced => "Advanced Protection",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Advanced => "advanced",
        }
    }

    /// Whether the barrier shock tier participates in the hedge
    pub fn has_shock_tier(self) -> bool {
        matches!(self, Self::Advanced)
    }
}

impl fmt::Display for HedgingScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown hedging scenario '{0}' (expected base or advanced)")]
pub struct ParseScenarioError(pub String);

impl FromStr for HedgingScenario {
    type Err = ParseScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base" | "normal" => Ok(Self::Base),
            "advanced" | "extreme" => Ok(Self::Advanced),
            other => Err(ParseScenarioError(other.to_owned())),
        }
    }
}
