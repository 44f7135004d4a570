//! LocalStorage backend for the post store

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::error::StorageError;
use crate::storage::KeyValueStorage;

/// The window's LocalStorage
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Fails when there is no window or storage is disabled
    pub fn open() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

fn rejected(err: JsValue) -> StorageError {
    StorageError::Rejected(
        err.as_string()
            .unwrap_or_else(|| format!("{:?}", err)),
    )
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(rejected)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(rejected)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(rejected)
    }
}
