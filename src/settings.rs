//! Player preferences
//!
//! Persisted separately from best scores: LocalStorage on the web, a JSON
//! file on native targets.

use serde::{Deserialize, Serialize};

use crate::sim::difficulty::Tier;

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tier highlighted when the menu first opens
    pub last_tier: Tier,
    /// Impulse on the game-over screen restarts right away instead of
    /// returning to the menu
    pub instant_restart: bool,
    /// Fixed RNG seed (None = seed from the clock)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_tier: Tier::Medium,
            instant_restart: false,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "season_flap_settings";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt settings file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r#"{"last_tier":"hard"}"#).unwrap();
        assert_eq!(settings.last_tier, Tier::Hard);
        assert!(!settings.instant_restart);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_unknown_tier_is_rejected() {
        assert!(Settings::from_json(r#"{"last_tier":"insane"}"#).is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("season_flap_settings_{}.json", std::process::id()));
        std::fs::write(&path, "garbage").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());

        let custom = Settings {
            last_tier: Tier::Easy,
            instant_restart: true,
            seed: Some(3),
        };
        custom.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path), custom);
        let _ = std::fs::remove_file(&path);
    }
}
