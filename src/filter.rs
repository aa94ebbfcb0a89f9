//! Derived views over the pet collection.

use crate::model::Pet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pets at least this many years old count as adults.
pub const ADULT_AGE_YEARS: i64 = 5;

/// Age bucket selected in the list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgeCategory {
    #[default]
    All,
    Young,
    Adult,
}

impl AgeCategory {
    /// A pet whose age does not start with a number is neither young nor
    /// adult, so it only shows up under `All`.
    pub fn matches(&self, pet: &Pet) -> bool {
        match self {
            Self::All => true,
            Self::Young => pet.age_years().is_some_and(|age| age < ADULT_AGE_YEARS),
            Self::Adult => pet.age_years().is_some_and(|age| age >= ADULT_AGE_YEARS),
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::All => "all",
            Self::Young => "young",
            Self::Adult => "adult",
        };
        write!(f, "{label}")
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown age category '{0}' (expected all, young or adult)")]
pub struct UnknownCategory(pub String);

impl FromStr for AgeCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "young" => Ok(Self::Young),
            "adult" => Ok(Self::Adult),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Search text plus age category, as driven by the list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetFilter {
    search_text: String,
    category: AgeCategory,
}

impl PetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = search_text.into().to_lowercase();
        self
    }

    pub fn with_category(mut self, category: AgeCategory) -> Self {
        self.category = category;
        self
    }

    pub fn category(&self) -> AgeCategory {
        self.category
    }

    pub fn matches(&self, pet: &Pet) -> bool {
        let name_matches =
            self.search_text.is_empty() || pet.name.to_lowercase().contains(&self.search_text);
        name_matches && self.category.matches(pet)
    }

    /// Pets passing the filter, in their original order.
    pub fn apply(&self, pets: &[Pet]) -> Vec<Pet> {
        pets.iter().filter(|pet| self.matches(pet)).cloned().collect()
    }
}

/// Case-insensitive name search combined with an age category.
pub fn filter(pets: &[Pet], search_text: &str, category: AgeCategory) -> Vec<Pet> {
    PetFilter::new()
        .with_search(search_text)
        .with_category(category)
        .apply(pets)
}
