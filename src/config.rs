use crate::storage::{FileKeyValueStore, PersistentStore};
use std::path::PathBuf;
use std::sync::Arc;

/// Key the pet list has always been stored under.
pub const DEFAULT_STORAGE_KEY: &str = "@pets_data";

pub const DATA_DIR_ENV: &str = "PETSTORE_DATA_DIR";
pub const STORAGE_KEY_ENV: &str = "PETSTORE_STORAGE_KEY";

/// Where and under which key the pet list lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding one file per storage key
    pub data_dir: PathBuf,

    /// Key the whole collection is written under
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".petstore"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `PETSTORE_DATA_DIR` / `PETSTORE_STORAGE_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(key) = lookup(STORAGE_KEY_ENV).filter(|v| !v.is_empty()) {
            config.storage_key = key;
        }
        config
    }

    /// Set the data directory
    pub fn data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Set the storage key
    pub fn storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    /// File-backed store for this configuration.
    pub fn persistent_store(&self) -> PersistentStore {
        let backend = Arc::new(FileKeyValueStore::new(self.data_dir.clone()));
        PersistentStore::new(backend, self.storage_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::new();
        assert_eq!(config.data_dir, PathBuf::from(".petstore"));
        assert_eq!(config.storage_key, "@pets_data");
    }

    #[test]
    fn test_lookup_overrides() {
        let config = StoreConfig::from_lookup(|name| match name {
            DATA_DIR_ENV => Some("/tmp/pets".to_string()),
            STORAGE_KEY_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.data_dir, PathBuf::from("/tmp/pets"));
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_builder_setters() {
        let config = StoreConfig::new().data_dir("/srv/pets").storage_key("pets_v2");
        assert_eq!(config.data_dir, PathBuf::from("/srv/pets"));
        assert_eq!(config.persistent_store().key(), "pets_v2");
    }
}
