//! Error types for identifier validation

use thiserror::Error;

/// Errors that can occur while building a typed identifier
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty or whitespace only
    #[error("{kind} name cannot be empty")]
    EmptyName { kind: &'static str },

    /// Name contains characters outside the allowed set
    #[error("{kind} name '{name}' contains invalid character '{found}'")]
    InvalidCharacter {
        kind: &'static str,
        name: String,
        found: char,
    },
}
