//! JSON file best-score store (native)

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::highscores::BestScores;
use crate::sim::difficulty::Tier;

use super::{BestScoreStore, StoreError};

/// Stores all tiers in one JSON object: `{"easy":3,"medium":7,"hard":0}`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BestScores, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(BestScores::from_json(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BestScores::default()),
            Err(e) => Err(e.into()),
        }
    }
}

impl BestScoreStore for JsonFileStore {
    fn load_best_score(&self, tier: Tier) -> Result<u32, StoreError> {
        Ok(self.read_all()?.get(tier))
    }

    fn save_best_score(&mut self, tier: Tier, value: u32) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking the save
        let mut scores = self.read_all().unwrap_or_default();
        if !scores.record(tier, value) {
            log::debug!("Stored {} best already >= {}", tier.as_str(), value);
            return Ok(());
        }

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, scores.to_json()?)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Best score saved ({} = {})", tier.as_str(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("season_flap_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert_eq!(store.load_best_score(Tier::Easy).unwrap(), 0);
    }

    #[test]
    fn test_lower_save_keeps_stored_best() {
        let path = temp_path("keeps_best");
        let mut first = JsonFileStore::new(&path);
        let mut second = JsonFileStore::new(&path);
        first.save_best_score(Tier::Medium, 10).unwrap();
        second.save_best_score(Tier::Medium, 5).unwrap();

        assert_eq!(JsonFileStore::new(&path).load_best_score(Tier::Medium).unwrap(), 10);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_round_trip_across_instances() {
        let path = temp_path("round_trip");
        let mut store = JsonFileStore::new(&path);
        store.save_best_score(Tier::Medium, 17).unwrap();
        store.save_best_score(Tier::Easy, 4).unwrap();

        let fresh = JsonFileStore::new(&path);
        assert_eq!(fresh.load_best_score(Tier::Medium).unwrap(), 17);
        assert_eq!(fresh.load_best_score(Tier::Easy).unwrap(), 4);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ nope").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.load_best_score(Tier::Hard),
            Err(StoreError::Json(_))
        ));
        let _ = fs::remove_file(&path);
    }
}
