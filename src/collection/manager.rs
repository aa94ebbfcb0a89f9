use super::command::CollectionCommand;
use super::worker::{CollectionSnapshot, SaveWorker, spawn_save_worker};
use crate::core::Result;
use crate::model::Pet;
use crate::storage::PersistentStore;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    /// Storage has not been read yet; nothing is saved in this state.
    Uninitialized,
    /// The stored list has been loaded and every change is being persisted.
    Hydrated,
}

/// Owns the in-memory pet list and keeps storage in step with it.
///
/// Mutations apply to memory right away and never fail. Each one publishes
/// a new snapshot to observers and to the save worker, which writes the
/// whole list in the background. Save failures are logged; use
/// [`flush`](Self::flush) to wait for (and observe) persistence.
pub struct CollectionManager {
    store: PersistentStore,
    pets: Vec<Pet>,
    state: ManagerState,
    pending: Vec<CollectionCommand>,
    generation: u64,
    snapshot_tx: watch::Sender<CollectionSnapshot>,
    worker: Option<SaveWorker>,
}

impl CollectionManager {
    /// Creates an empty, not yet hydrated manager.
    pub fn new(store: PersistentStore) -> Self {
        let (snapshot_tx, _) = watch::channel(CollectionSnapshot::default());
        Self {
            store,
            pets: Vec::new(),
            state: ManagerState::Uninitialized,
            pending: Vec::new(),
            generation: 0,
            snapshot_tx,
            worker: None,
        }
    }

    /// Creates a manager and hydrates it from `store`.
    pub async fn open(store: PersistentStore) -> Self {
        let mut manager = Self::new(store);
        manager.hydrate().await;
        manager
    }

    pub fn state(&self) -> ManagerState {
        self.state
    }

    /// Loads the stored list and starts persisting changes.
    ///
    /// Edits made before hydration are replayed on top of the loaded list and
    /// then saved. A load failure leaves the list empty. Calling this again
    /// once hydrated does nothing.
    pub async fn hydrate(&mut self) {
        if self.state == ManagerState::Hydrated {
            debug!("pet collection already hydrated");
            return;
        }

        let mut pets = self.store.load().await;
        let replayed = self.pending.len();
        for command in self.pending.drain(..) {
            command.apply(&mut pets);
        }
        self.pets = pets;
        self.state = ManagerState::Hydrated;

        let mut worker_rx = self.snapshot_tx.subscribe();
        self.publish();
        let durable_generation = if replayed == 0 {
            // The loaded list is what storage already holds.
            let _ = worker_rx.borrow_and_update();
            self.generation
        } else {
            self.generation - 1
        };
        self.worker = Some(spawn_save_worker(
            self.store.clone(),
            worker_rx,
            durable_generation,
        ));

        info!(
            key = self.store.key(),
            count = self.pets.len(),
            replayed,
            "pet collection hydrated"
        );
    }

    /// Appends `pet`. The caller assigns its id; duplicates are not rejected.
    pub fn add(&mut self, pet: Pet) {
        self.execute(CollectionCommand::Add(pet));
    }

    /// Replaces the pet with the same id in place. Unknown ids are ignored.
    pub fn update(&mut self, pet: Pet) {
        self.execute(CollectionCommand::Update(pet));
    }

    /// Removes the pet with `id`. Unknown ids are ignored.
    pub fn delete(&mut self, id: &str) {
        self.execute(CollectionCommand::Delete(id.to_string()));
    }

    /// Current list in insertion order.
    pub fn list(&self) -> &[Pet] {
        &self.pets
    }

    pub fn get(&self, id: &str) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.id == id)
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    /// Receiver that sees a new snapshot after every change, including
    /// hydration.
    pub fn subscribe(&self) -> watch::Receiver<CollectionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Waits until every change made so far has been written.
    ///
    /// Returns the storage error if the newest write failed. Before
    /// hydration there is nothing to wait for.
    pub async fn flush(&self) -> Result<()> {
        match &self.worker {
            Some(worker) => worker.wait_for(self.generation).await,
            None => Ok(()),
        }
    }

    /// Stops the save worker after it has written the latest snapshot.
    pub async fn shutdown(self) -> Result<()> {
        let Self {
            snapshot_tx,
            worker,
            ..
        } = self;
        drop(snapshot_tx);

        match worker {
            Some(worker) => worker.join().await,
            None => Ok(()),
        }
    }

    fn execute(&mut self, command: CollectionCommand) {
        let name = command.name();
        match self.state {
            ManagerState::Uninitialized => {
                self.pending.push(command.clone());
                if command.apply(&mut self.pets) {
                    self.publish();
                }
                debug!(command = name, "queued pet change until hydration");
            }
            ManagerState::Hydrated => {
                if command.apply(&mut self.pets) {
                    self.publish();
                } else {
                    debug!(command = name, "pet change matched nothing");
                }
            }
        }
    }

    fn publish(&mut self) {
        self.generation += 1;
        self.snapshot_tx.send_replace(CollectionSnapshot {
            generation: self.generation,
            pets: Arc::new(self.pets.clone()),
        });
    }
}
