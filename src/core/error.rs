use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Save worker stopped before the collection was persisted")]
    WorkerStopped,
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Wraps an I/O failure with the path or key it happened on.
    pub fn storage(context: impl std::fmt::Display, err: impl std::fmt::Display) -> Self {
        Self::Storage(format!("{}: {}", context, err))
    }
}
