use crate::core::{Result, StoreError};
use crate::model::Pet;
use crate::storage::PersistentStore;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// The pet list as of one mutation, numbered by a per-manager generation.
#[derive(Debug, Clone, Default)]
pub struct CollectionSnapshot {
    pub generation: u64,
    pub pets: Arc<Vec<Pet>>,
}

#[derive(Debug, Clone)]
struct SaveStatus {
    generation: u64,
    last_error: Option<String>,
}

/// Background task writing snapshots to the persistent store.
///
/// Only one save runs at a time. Snapshots published while a save is in
/// flight coalesce, and the next save writes the newest one.
pub(crate) struct SaveWorker {
    status_rx: watch::Receiver<SaveStatus>,
    join_handle: Option<JoinHandle<()>>,
}

impl SaveWorker {
    /// Waits until `generation` (or a later one) has been written.
    ///
    /// Returns the error of that write if it failed.
    pub async fn wait_for(&self, generation: u64) -> Result<()> {
        let mut status_rx = self.status_rx.clone();
        let last_error = {
            let status = status_rx
                .wait_for(|status| status.generation >= generation)
                .await
                .map_err(|_| StoreError::WorkerStopped)?;
            status.last_error.clone()
        };

        match last_error {
            Some(message) => Err(StoreError::Storage(message)),
            None => Ok(()),
        }
    }

    /// Waits for the task to exit. The task only exits once every snapshot
    /// sender is gone, after writing the last snapshot it saw.
    pub async fn join(mut self) -> Result<()> {
        if let Some(join_handle) = self.join_handle.take() {
            join_handle
                .await
                .map_err(|err| StoreError::Storage(format!("save worker join: {}", err)))?;
        }
        Ok(())
    }
}

/// Spawns the save task. `durable_generation` is the newest generation that
/// storage already reflects.
pub(crate) fn spawn_save_worker(
    store: PersistentStore,
    mut snapshots: watch::Receiver<CollectionSnapshot>,
    durable_generation: u64,
) -> SaveWorker {
    let (status_tx, status_rx) = watch::channel(SaveStatus {
        generation: durable_generation,
        last_error: None,
    });

    let join_handle = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let snapshot = snapshots.borrow_and_update().clone();
            let last_error = match store.try_save(&snapshot.pets).await {
                Ok(()) => {
                    debug!(
                        generation = snapshot.generation,
                        count = snapshot.pets.len(),
                        "persisted pet collection"
                    );
                    None
                }
                Err(err) => {
                    error!(
                        generation = snapshot.generation,
                        error = %err,
                        "failed to save pets to storage"
                    );
                    Some(err.to_string())
                }
            };
            status_tx.send_replace(SaveStatus {
                generation: snapshot.generation,
                last_error,
            });
        }
        debug!(key = store.key(), "save worker stopped");
    });

    SaveWorker {
        status_rx,
        join_handle: Some(join_handle),
    }
}
