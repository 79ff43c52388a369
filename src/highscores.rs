//! Per-tier best scores
//!
//! Serialized as one JSON object keyed by tier name, which is also the
//! on-disk / LocalStorage format used by the stores in `persistence`.

use serde::{Deserialize, Serialize};

use crate::sim::difficulty::Tier;

/// Best score for each tier. Values only ever increase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BestScores {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl BestScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Easy => self.easy,
            Tier::Medium => self.medium,
            Tier::Hard => self.hard,
        }
    }

    fn slot_mut(&mut self, tier: Tier) -> &mut u32 {
        match tier {
            Tier::Easy => &mut self.easy,
            Tier::Medium => &mut self.medium,
            Tier::Hard => &mut self.hard,
        }
    }

    /// Check if a score beats the current best for its tier
    pub fn qualifies(&self, tier: Tier, score: u32) -> bool {
        score > self.get(tier)
    }

    /// Record a finished run. Returns true if it set a new best.
    pub fn record(&mut self, tier: Tier, score: u32) -> bool {
        if !self.qualifies(tier, score) {
            return false;
        }
        *self.slot_mut(tier) = score;
        true
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_monotonic() {
        let mut best = BestScores::new();
        assert!(best.record(Tier::Easy, 5));
        assert!(!best.record(Tier::Easy, 3));
        assert!(!best.record(Tier::Easy, 5));
        assert_eq!(best.get(Tier::Easy), 5);
        assert!(best.record(Tier::Easy, 6));
        assert_eq!(best.get(Tier::Easy), 6);
    }

    #[test]
    fn test_tiers_are_independent() {
        let mut best = BestScores::new();
        best.record(Tier::Hard, 9);
        assert_eq!(best.get(Tier::Hard), 9);
        assert_eq!(best.get(Tier::Medium), 0);
        assert!(!best.qualifies(Tier::Medium, 0));
    }

    #[test]
    fn test_json_keys_are_tier_names() {
        let best = BestScores {
            easy: 1,
            medium: 2,
            hard: 3,
        };
        let json = best.to_json().unwrap();
        assert!(json.contains("\"medium\":2"));
        assert_eq!(BestScores::from_json(&json).unwrap(), best);
        // Missing tiers default to 0
        assert_eq!(BestScores::from_json(r#"{"hard":4}"#).unwrap().get(Tier::Easy), 0);
    }
}
