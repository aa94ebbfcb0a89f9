use crate::model::Pet;
use tracing::warn;

/// A single edit to the pet list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionCommand {
    Add(Pet),
    Update(Pet),
    Delete(String),
}

impl CollectionCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
        }
    }

    /// Applies the edit and reports whether the list changed.
    ///
    /// Update and delete match on `id`; an unknown id leaves the list as it was.
    pub fn apply(self, pets: &mut Vec<Pet>) -> bool {
        match self {
            Self::Add(pet) => {
                if pets.iter().any(|existing| existing.id == pet.id) {
                    // Not rejected: callers own id uniqueness.
                    warn!(id = %pet.id, "adding a pet whose id is already in the collection");
                }
                pets.push(pet);
                true
            }
            Self::Update(pet) => match pets.iter_mut().find(|existing| existing.id == pet.id) {
                Some(slot) => {
                    *slot = pet;
                    true
                }
                None => false,
            },
            Self::Delete(id) => {
                let before = pets.len();
                pets.retain(|existing| existing.id != id);
                pets.len() != before
            }
        }
    }
}
