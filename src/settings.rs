//! Board settings
//!
//! Persisted separately from the posts in LocalStorage. Every field has a
//! default, so a partial settings object only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::post::DEFAULT_IMAGE;
use crate::storage::KeyValueStorage;
use crate::store::Store;

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Key the post collection is stored under
    pub storage_key: String,
    /// Image for posts submitted without one
    pub default_image: String,
    /// Text shown in the list instead of the post content
    pub summary_placeholder: String,
    /// chrono format string for the creation date in the list
    pub date_format: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            storage_key: Store::DEFAULT_KEY.to_string(),
            default_image: DEFAULT_IMAGE.to_string(),
            summary_placeholder: "...".to_string(),
            // ko-KR short date, e.g. "2025. 2. 4."
            date_format: "%Y. %-m. %-d.".to_string(),
        }
    }
}

impl BoardSettings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "bulletin_board_settings";

    /// Load settings, falling back to defaults when absent or malformed
    pub fn load<S: KeyValueStorage + ?Sized>(storage: &S) -> Self {
        if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save<S: KeyValueStorage + ?Sized>(&self, storage: &mut S) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_defaults_when_missing() {
        let storage = MemoryStorage::new();
        let settings = BoardSettings::load(&storage);
        assert_eq!(settings, BoardSettings::default());
        assert_eq!(settings.storage_key, "posts");
        assert_eq!(settings.default_image, "./images/people.png");
    }

    #[test]
    fn test_partial_override() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(BoardSettings::STORAGE_KEY, r#"{"storage_key":"board_posts"}"#)
            .unwrap();
        let settings = BoardSettings::load(&storage);
        assert_eq!(settings.storage_key, "board_posts");
        assert_eq!(settings.summary_placeholder, "...");
    }

    #[test]
    fn test_malformed_falls_back() {
        let mut storage = MemoryStorage::new();
        storage.set_item(BoardSettings::STORAGE_KEY, "[]").unwrap();
        assert_eq!(BoardSettings::load(&storage), BoardSettings::default());
    }

    #[test]
    fn test_save_round_trip() {
        let mut storage = MemoryStorage::new();
        let settings = BoardSettings {
            summary_placeholder: "(more)".to_string(),
            ..Default::default()
        };
        settings.save(&mut storage).unwrap();
        assert_eq!(BoardSettings::load(&storage), settings);
    }
}
