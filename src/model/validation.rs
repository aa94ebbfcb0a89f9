//! Submission rules for the pet form.
//!
//! A form is valid when `name` is non-empty after trimming and `age` reads as
//! a positive number. `description` and `photo` are free-form.

use super::pet::Pet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetField {
    Name,
    Age,
}

impl fmt::Display for PetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Name => "name",
            Self::Age => "age",
        };
        write!(f, "{label}")
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Age is required")]
    AgeRequired,

    #[error("Age must be a number")]
    AgeNotANumber,

    #[error("Age must be a positive number")]
    AgeNotPositive,
}

impl ValidationError {
    pub fn field(&self) -> PetField {
        match self {
            Self::NameRequired => PetField::Name,
            Self::AgeRequired | Self::AgeNotANumber | Self::AgeNotPositive => PetField::Age,
        }
    }
}

/// Every field error found in one form, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn for_field(&self, field: PetField) -> Option<ValidationError> {
        self.errors.iter().copied().find(|err| err.field() == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", err.field(), err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw input as it comes out of the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetForm {
    pub name: String,
    pub age: String,
    pub description: String,
    pub photo: Option<String>,
}

impl PetForm {
    pub fn new(name: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Pre-fills the form from an existing pet for editing.
    pub fn from_pet(pet: &Pet) -> Self {
        Self {
            name: pet.name.clone(),
            age: pet.age.clone(),
            description: pet.description.clone().unwrap_or_default(),
            photo: pet.photo.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::NameRequired);
        }
        if let Err(err) = check_age(&self.age) {
            errors.push(err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }

    /// Validates the form and builds the pet to hand to the collection.
    ///
    /// `existing_id` is the id of the pet being edited; a new id is generated
    /// when it is `None`. Text fields are trimmed and an empty description or
    /// photo is dropped.
    pub fn submit(self, existing_id: Option<&str>) -> Result<Pet, ValidationErrors> {
        self.validate()?;

        let id = match existing_id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Pet::generate_id(),
        };
        let description = Some(self.description.trim().to_string()).filter(|d| !d.is_empty());
        let photo = self.photo.filter(|p| !p.trim().is_empty());

        Ok(Pet {
            id,
            name: self.name.trim().to_string(),
            age: self.age.trim().to_string(),
            description,
            photo,
        })
    }
}

fn check_age(age: &str) -> Result<f64, ValidationError> {
    let compact: String = age.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(ValidationError::AgeRequired);
    }

    let value = compact
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(ValidationError::AgeNotANumber)?;
    if value <= 0.0 {
        return Err(ValidationError::AgeNotPositive);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form() {
        let form = PetForm::new("Buddy", "3").description("A friendly dog");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_name_is_required() {
        let errors = PetForm::new("", "3").validate().unwrap_err();
        assert_eq!(errors.errors(), &[ValidationError::NameRequired]);

        let errors = PetForm::new("   ", "3").validate().unwrap_err();
        assert_eq!(errors.for_field(PetField::Name), Some(ValidationError::NameRequired));
    }

    #[test]
    fn test_age_must_be_positive() {
        let errors = PetForm::new("Buddy", "-1").validate().unwrap_err();
        assert_eq!(errors.for_field(PetField::Age), Some(ValidationError::AgeNotPositive));

        let errors = PetForm::new("Buddy", "0").validate().unwrap_err();
        assert_eq!(errors.for_field(PetField::Age), Some(ValidationError::AgeNotPositive));
    }

    #[test]
    fn test_age_must_be_numeric() {
        for age in ["abc", "3 years", "inf", "NaN"] {
            let errors = PetForm::new("Buddy", age).validate().unwrap_err();
            assert_eq!(
                errors.for_field(PetField::Age),
                Some(ValidationError::AgeNotANumber),
                "age {age:?}"
            );
        }
    }

    #[test]
    fn test_age_accepts_decimals_and_padding() {
        assert!(PetForm::new("Buddy", "0.5").validate().is_ok());
        assert!(PetForm::new("Buddy", " 12 ").validate().is_ok());
    }

    #[test]
    fn test_empty_age_is_required() {
        let errors = PetForm::new("Buddy", "  ").validate().unwrap_err();
        assert_eq!(errors.for_field(PetField::Age), Some(ValidationError::AgeRequired));
    }

    #[test]
    fn test_all_field_errors_reported_together() {
        let errors = PetForm::new("", "abc").validate().unwrap_err();
        assert_eq!(errors.errors().len(), 2);
        assert_eq!(
            errors.to_string(),
            "name: Name is required; age: Age must be a number"
        );
    }

    #[test]
    fn test_submit_trims_and_generates_id() {
        let pet = PetForm::new("  Rex ", " 1 ")
            .description("   ")
            .submit(None)
            .unwrap();
        assert!(!pet.id.is_empty());
        assert_eq!(pet.name, "Rex");
        assert_eq!(pet.age, "1");
        assert_eq!(pet.description, None);
        assert_eq!(pet.photo, None);
    }

    #[test]
    fn test_submit_keeps_existing_id_when_editing() {
        let original = Pet::new("42", "Max", "7")
            .with_description("Old")
            .with_photo("file:///max.jpg");
        let pet = PetForm::from_pet(&original)
            .description(" New ")
            .submit(Some("42"))
            .unwrap();
        assert_eq!(pet.id, "42");
        assert_eq!(pet.description.as_deref(), Some("New"));
        assert_eq!(pet.photo.as_deref(), Some("file:///max.jpg"));
    }

    #[test]
    fn test_submit_rejects_invalid_form() {
        assert!(PetForm::new("", "3").submit(None).is_err());
    }
}
