//! Browser LocalStorage best-score store (wasm32)

use crate::highscores::BestScores;
use crate::sim::difficulty::Tier;

use super::{BestScoreStore, StoreError};

#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    /// LocalStorage key holding the JSON blob
    const STORAGE_KEY: &'static str = "season_flap_best_scores";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("no LocalStorage".to_string()))
    }

    fn read_all(&self) -> Result<BestScores, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => Ok(BestScores::from_json(&json)?),
            Ok(None) => Ok(BestScores::default()),
            Err(_) => Err(StoreError::Unavailable("LocalStorage read failed".to_string())),
        }
    }
}

impl BestScoreStore for LocalStorageStore {
    fn load_best_score(&self, tier: Tier) -> Result<u32, StoreError> {
        Ok(self.read_all()?.get(tier))
    }

    fn save_best_score(&mut self, tier: Tier, value: u32) -> Result<(), StoreError> {
        let mut scores = self.read_all().unwrap_or_default();
        if !scores.record(tier, value) {
            return Ok(());
        }
        let storage = Self::storage()?;
        storage
            .set_item(Self::STORAGE_KEY, &scores.to_json()?)
            .map_err(|_| StoreError::Unavailable("LocalStorage write failed".to_string()))?;
        log::info!("Best score saved ({} = {})", tier.as_str(), value);
        Ok(())
    }
}
