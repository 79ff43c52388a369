//! Data-driven game balance
//!
//! Per-tier parameters can be overridden from a JSON document; tiers missing
//! from the document keep their built-in values.

use serde::{Deserialize, Serialize};

use crate::sim::difficulty::{Tier, TierParams};

/// Balance table for all tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub easy: TierParams,
    pub medium: TierParams,
    pub hard: TierParams,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            easy: TierParams::for_tier(Tier::Easy),
            medium: TierParams::for_tier(Tier::Medium),
            hard: TierParams::for_tier(Tier::Hard),
        }
    }
}

impl Tuning {
    /// Parameters for a tier
    pub fn params(&self, tier: Tier) -> &TierParams {
        match tier {
            Tier::Easy => &self.easy,
            Tier::Medium => &self.medium,
            Tier::Hard => &self.hard,
        }
    }

    /// Parse a tuning document, clamping values into valid ranges
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn sanitized(self) -> Self {
        Self {
            easy: self.easy.sanitized(),
            medium: self.medium.sanitized(),
            hard: self.hard.sanitized(),
        }
    }
}
