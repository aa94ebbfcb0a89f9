//! In-memory pet list synchronized to persistent storage.

pub mod command;
pub mod manager;
mod worker;

pub use command::CollectionCommand;
pub use manager::{CollectionManager, ManagerState};
pub use worker::CollectionSnapshot;
