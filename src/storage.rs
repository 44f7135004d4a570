//! Key-value persistence backend
//!
//! The board only needs string get/set/remove, which is exactly what
//! LocalStorage offers. The browser implementation lives in
//! `platform::storage`; [`MemoryStorage`] backs native builds and tests.

use std::collections::HashMap;

use crate::error::StorageError;

/// String key-value store with LocalStorage semantics
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-process storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    /// Reject all writes, like a full or locked-down LocalStorage
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses every write
    pub fn read_only() -> Self {
        Self {
            items: HashMap::new(),
            read_only: true,
        }
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Rejected(format!("'{}' is read-only", key)));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Rejected(format!("'{}' is read-only", key)));
        }
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_basics() {
        let mut storage = MemoryStorage::new();
        assert!(storage.is_empty());
        assert_eq!(storage.get_item("posts").unwrap(), None);

        storage.set_item("posts", "[]").unwrap();
        assert_eq!(storage.get_item("posts").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.len(), 1);

        storage.set_item("posts", "[1]").unwrap();
        assert_eq!(storage.get_item("posts").unwrap().as_deref(), Some("[1]"));

        storage.remove_item("posts").unwrap();
        assert_eq!(storage.get_item("posts").unwrap(), None);
    }

    #[test]
    fn test_boxed_storage_delegates() {
        let mut storage: Box<dyn KeyValueStorage> = Box::new(MemoryStorage::new());
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let mut storage = MemoryStorage::read_only();
        assert!(matches!(
            storage.set_item("posts", "[]"),
            Err(StorageError::Rejected(_))
        ));
        assert!(storage.is_empty());

        storage.set_read_only(false);
        assert!(storage.set_item("posts", "[]").is_ok());
    }
}
