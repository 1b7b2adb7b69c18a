//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;

    /// Overwrite the identifier, e.g. with the one taken from a request path
    fn set_id(&mut self, id: Self::Id);
}

/// Entities that check their own field constraints before being stored
pub trait Validate {
    fn validate(&self) -> DomainResult<()>;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    NotFound(String),
    InvalidInput(String),
    Conflict(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

/// Collects every empty required field so a single error names all of them
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, field: &'static str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.missing.push(field);
        }
        self
    }

    pub fn present<T>(mut self, field: &'static str, value: &Option<T>) -> Self {
        if value.is_none() {
            self.missing.push(field);
        }
        self
    }

    pub fn non_empty<T>(mut self, field: &'static str, value: &[T]) -> Self {
        if value.is_empty() {
            self.missing.push(field);
        }
        self
    }

    pub fn finish(self) -> DomainResult<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidInput(format!(
                "required fields are empty: {}",
                self.missing.join(", ")
            )))
        }
    }
}

/// Fails unless `min <= value <= max`
pub fn check_range(field: &str, value: i64, min: i64, max: i64) -> DomainResult<()> {
    if value < min || value > max {
        return Err(DomainError::InvalidInput(format!(
            "{} must be between {} and {}",
            field, min, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_lists_every_missing_field() {
        let err = RequiredFields::new()
            .text("name", "")
            .text("location", "  ")
            .text("status", "ok")
            .present::<u32>("dueDate", &None)
            .finish()
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidInput("required fields are empty: name, location, dueDate".to_string())
        );
    }

    #[test]
    fn test_required_fields_pass() {
        assert!(RequiredFields::new()
            .text("name", "Relay")
            .non_empty("team", &["a"])
            .finish()
            .is_ok());
    }

    #[test]
    fn test_check_range_bounds_are_inclusive() {
        assert!(check_range("progress", 0, 0, 100).is_ok());
        assert!(check_range("progress", 100, 0, 100).is_ok());
        assert!(check_range("progress", 101, 0, 100).is_err());
        assert!(check_range("progress", -1, 0, 100).is_err());
    }
}
