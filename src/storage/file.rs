//! Directory-backed key-value store: one file per key.

use super::kv::KeyValueStore;
use crate::core::{Result, StoreError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9_-]` map to `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{}.json", file_stem))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::storage(
                format!("Failed to read '{}'", path.display()),
                err,
            )),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        atomic_write(&path, value.as_bytes()).await?;
        debug!(key, path = %path.display(), bytes = value.len(), "wrote key");
        Ok(())
    }
}

async fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(|err| {
            StoreError::storage(
                format!("Failed to create parent directory '{}'", parent.display()),
                err,
            )
        })?;
    }

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).await.map_err(|err| {
        StoreError::storage(format!("Failed to write temp file '{}'", tmp.display()), err)
    })?;

    fs::rename(&tmp, path).await.map_err(|err| {
        StoreError::storage(
            format!(
                "Failed to rename temp file '{}' -> '{}'",
                tmp.display(),
                path.display()
            ),
            err,
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_sanitizes_key() {
        let store = FileKeyValueStore::new("/data");
        assert_eq!(store.path_for("@pets_data"), PathBuf::from("/data/_pets_data.json"));
        assert_eq!(store.path_for("a/../b"), PathBuf::from("/data/a____b.json"));
    }

    #[tokio::test]
    async fn test_missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        assert_eq!(store.get("@pets_data").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("nested"));

        store.set("@pets_data", "[1]").await.unwrap();
        store.set("@pets_data", "[2]").await.unwrap();

        assert_eq!(store.get("@pets_data").await.unwrap().as_deref(), Some("[2]"));
        assert!(!store.path_for("@pets_data").with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        std::fs::create_dir(store.path_for("blocked")).unwrap();
        assert!(store.get("blocked").await.is_err());
    }
}
