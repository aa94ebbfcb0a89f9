// ============================================================================
// petstore Library
// ============================================================================

//! Personal pet list kept in memory and persisted to a key-value store.
//!
//! ```no_run
//! use petstore::{AgeCategory, CollectionManager, PetForm, StoreConfig, filter};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = StoreConfig::from_env().persistent_store();
//! let mut pets = CollectionManager::open(store).await;
//!
//! let buddy = PetForm::new("Buddy", "3").description("A friendly dog").submit(None)?;
//! pets.add(buddy);
//! pets.flush().await?;
//!
//! let young = filter(pets.list(), "bud", AgeCategory::Young);
//! println!("{} young pets named like 'bud'", young.len());
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod config;
pub mod core;
pub mod filter;
pub mod model;
pub mod storage;

// Re-export main types for convenience
pub use collection::{CollectionCommand, CollectionManager, CollectionSnapshot, ManagerState};
pub use config::{DEFAULT_STORAGE_KEY, StoreConfig};
pub use crate::core::{Result, StoreError};
pub use filter::{ADULT_AGE_YEARS, AgeCategory, PetFilter, UnknownCategory, filter};
pub use model::{Pet, PetField, PetForm, ValidationError, ValidationErrors};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, PersistentStore};
