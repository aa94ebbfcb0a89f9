//! Whole-collection persistence under a single storage key.

use super::kv::KeyValueStore;
use crate::config::DEFAULT_STORAGE_KEY;
use crate::core::Result;
use crate::model::Pet;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Reads and writes the full pet list as one JSON document.
///
/// There is no diffing: every save rewrites the whole list.
#[derive(Clone)]
pub struct PersistentStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl PersistentStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn with_default_key(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::new(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the stored list. An absent or blank value is an empty list.
    pub async fn try_load(&self) -> Result<Vec<Pet>> {
        match self.backend.get(&self.key).await? {
            Some(text) if !text.trim().is_empty() => Ok(serde_json::from_str(&text)?),
            _ => Ok(Vec::new()),
        }
    }

    /// Like [`try_load`](Self::try_load), but a storage or decode failure is
    /// logged and reads as an empty list.
    pub async fn load(&self) -> Vec<Pet> {
        match self.try_load().await {
            Ok(pets) => {
                debug!(key = %self.key, count = pets.len(), "loaded pets");
                pets
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to load pets from storage, starting empty");
                Vec::new()
            }
        }
    }

    pub async fn try_save(&self, pets: &[Pet]) -> Result<()> {
        let text = serde_json::to_string(pets)?;
        self.backend.set(&self.key, &text).await
    }

    /// Writes `pets`, logging instead of returning a failure.
    pub async fn save(&self, pets: &[Pet]) {
        match self.try_save(pets).await {
            Ok(()) => debug!(key = %self.key, count = pets.len(), "saved pets"),
            Err(err) => error!(key = %self.key, error = %err, "failed to save pets to storage"),
        }
    }
}
