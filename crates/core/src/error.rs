//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic input failures (missing fields,
/// malformed fragments and numbers). Every variant is detected before any
/// write occurs; infrastructure faults belong to the store/mailer crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required input field was absent or blank.
    #[error("required field missing: {0}")]
    MissingField(&'static str),

    /// An identifier fragment contained anything other than decimal digits.
    #[error("identifier fragment must be digits only, got {0:?}")]
    InvalidFragment(String),

    /// A contact number was present but not exactly 10 digits.
    #[error("contact number must be exactly 10 digits, got {0:?}")]
    InvalidContactNumber(String),

    /// A string failed to parse as a canonical identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    pub fn invalid_fragment(fragment: impl Into<String>) -> Self {
        Self::InvalidFragment(fragment.into())
    }

    pub fn invalid_contact(number: impl Into<String>) -> Self {
        Self::InvalidContactNumber(number.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
