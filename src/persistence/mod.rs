//! Best-score persistence
//!
//! The simulation only sees the [`BestScoreStore`] trait. Backends:
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `JsonFileStore`: JSON file on native targets
//! - `LocalStorageStore`: browser LocalStorage on wasm32

pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use thiserror::Error;

use crate::sim::difficulty::Tier;

/// Failure from a best-score backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt best-score data: {0}")]
    Json(#[from] serde_json::Error),
    /// Backend not reachable (no window, storage disabled)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Key-value storage for per-tier best scores
pub trait BestScoreStore {
    /// Best score for a tier; 0 when nothing was stored yet
    fn load_best_score(&self, tier: Tier) -> Result<u32, StoreError>;

    /// Persist a score. Backends keep the higher of the stored and given value.
    fn save_best_score(&mut self, tier: Tier, value: u32) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_store_error_messages_and_sources() {
        let io: StoreError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(io.to_string(), "storage I/O error: denied");
        assert!(io.source().is_some());

        let json: StoreError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(json, StoreError::Json(_)));
        assert!(json.to_string().starts_with("corrupt best-score data: "));

        let offline = StoreError::Unavailable("no LocalStorage".to_string());
        assert_eq!(offline.to_string(), "storage unavailable: no LocalStorage");
        assert!(offline.source().is_none());
    }
}
