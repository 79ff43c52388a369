//! In-memory best-score store

use crate::highscores::BestScores;
use crate::sim::difficulty::Tier;

use super::{BestScoreStore, StoreError};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: BestScores,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scores(scores: BestScores) -> Self {
        Self { scores }
    }

    pub fn scores(&self) -> &BestScores {
        &self.scores
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best_score(&self, tier: Tier) -> Result<u32, StoreError> {
        Ok(self.scores.get(tier))
    }

    fn save_best_score(&mut self, tier: Tier, value: u32) -> Result<(), StoreError> {
        self.scores.record(tier, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut store = MemoryStore::new();
        store.save_best_score(Tier::Hard, 12).unwrap();
        assert_eq!(store.load_best_score(Tier::Hard).unwrap(), 12);
        assert_eq!(store.load_best_score(Tier::Easy).unwrap(), 0);
    }

    #[test]
    fn test_save_never_lowers() {
        let mut store = MemoryStore::new();
        store.save_best_score(Tier::Easy, 8).unwrap();
        store.save_best_score(Tier::Easy, 2).unwrap();
        assert_eq!(store.scores().easy, 8);
    }
}
