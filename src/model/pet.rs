use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single pet entry.
///
/// `age` is kept as the text the user typed; see [`Pet::age_years`] for the
/// numeric reading used by filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub age: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// URI of the picked image, never the image bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl Pet {
    pub fn new(id: impl Into<String>, name: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: age.into(),
            description: None,
            photo: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Fresh identifier for a pet that is about to be added.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Whole years read from the start of `age`, or `None` when it does not
    /// begin with a number.
    ///
    /// Leading whitespace and a sign are accepted and everything after the
    /// first run of digits is ignored, so `"4.9"` reads as 4 and
    /// `"6 years"` as 6.
    pub fn age_years(&self) -> Option<i64> {
        parse_leading_integer(&self.age)
    }
}

fn parse_leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    // Only digits remain, so the parse can fail on overflow alone.
    let value = rest[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aged(age: &str) -> Pet {
        Pet::new("1", "Buddy", age)
    }

    #[test]
    fn test_age_years_reads_leading_integer() {
        assert_eq!(aged("3").age_years(), Some(3));
        assert_eq!(aged("  7").age_years(), Some(7));
        assert_eq!(aged("4.9").age_years(), Some(4));
        assert_eq!(aged("6 years").age_years(), Some(6));
        assert_eq!(aged("-2").age_years(), Some(-2));
        assert_eq!(aged("+5").age_years(), Some(5));
    }

    #[test]
    fn test_age_years_rejects_non_numeric() {
        assert_eq!(aged("abc").age_years(), None);
        assert_eq!(aged("").age_years(), None);
        assert_eq!(aged("-").age_years(), None);
        assert_eq!(aged(".5").age_years(), None);
    }

    #[test]
    fn test_age_years_saturates_on_overflow() {
        assert_eq!(aged("99999999999999999999999").age_years(), Some(i64::MAX));
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let first = Pet::generate_id();
        let second = Pet::generate_id();
        assert!(!first.is_empty());
        assert_ne!(first, second);
    }

    #[test]
    fn test_optional_fields_are_omitted_from_json() {
        let json = serde_json::to_string(&Pet::new("1", "Buddy", "3")).unwrap();
        assert_eq!(json, r#"{"id":"1","name":"Buddy","age":"3"}"#);

        let full = Pet::new("2", "Max", "7")
            .with_description("Loves walks")
            .with_photo("file:///max.jpg");
        let json = serde_json::to_string(&full).unwrap();
        assert!(json.contains(r#""description":"Loves walks""#));
        assert!(json.contains(r#""photo":"file:///max.jpg""#));
    }
}
