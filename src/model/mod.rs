pub mod pet;
pub mod validation;

pub use pet::Pet;
pub use validation::{PetField, PetForm, ValidationError, ValidationErrors};
