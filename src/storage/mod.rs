pub mod file;
pub mod kv;
pub mod persistence;

pub use file::FileKeyValueStore;
pub use kv::{KeyValueStore, MemoryKeyValueStore};
pub use persistence::PersistentStore;
