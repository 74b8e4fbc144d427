//! Validation error types

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A single field failing its required/format check
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field exceeds maximum length
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// String doesn't match the expected format (URL, phone, timestamp)
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Value is not one of the allowed choices
    #[error("invalid {field} value: '{value}'")]
    InvalidVariant { field: &'static str, value: String },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::TooLong { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::InvalidVariant { field, .. } => field,
        }
    }
}

/// Every failure found in one submission, reported together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Record the error of a failed check, if any.
    pub fn check(&mut self, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.push(e);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field() == field)
    }

    /// Messages keyed by field name, as shown next to form inputs.
    pub fn by_field(&self) -> BTreeMap<&'static str, Vec<String>> {
        let mut map: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for e in &self.errors {
            map.entry(e.field()).or_default().push(e.to_string());
        }
        map
    }

    /// `Ok(value)` when nothing failed, otherwise the collected errors.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(e: ValidationError) -> Self {
        Self { errors: vec![e] }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.by_field().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 120,
        };
        assert_eq!(err.to_string(), "name exceeds maximum length of 120 characters");
    }

    #[test]
    fn groups_messages_by_field() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::Empty { field: "city" });
        errors.push(ValidationError::InvalidVariant {
            field: "genres",
            value: "Polka".into(),
        });
        errors.push(ValidationError::InvalidVariant {
            field: "genres",
            value: "Yodel".into(),
        });

        let map = errors.by_field();
        assert_eq!(map["city"], vec!["city cannot be empty"]);
        assert_eq!(map["genres"].len(), 2);
        assert!(errors.contains_field("genres"));
        assert!(!errors.contains_field("state"));
    }

    #[test]
    fn finish_passes_value_through_when_clean() {
        let errors = ValidationErrors::new();
        assert_eq!(errors.finish(7), Ok(7));
    }

    #[test]
    fn serializes_as_field_map() {
        let errors = ValidationErrors::from(ValidationError::Empty { field: "name" });
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["name"][0], "name cannot be empty");
    }
}
