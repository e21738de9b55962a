//! Contact value objects: equality by value, immutable once parsed.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A contact phone number: exactly 10 decimal digits.
///
/// Parsing trims surrounding whitespace; anything else (signs, separators,
/// shorter or longer numerals) is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactNumber(String);

impl ContactNumber {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let digits = raw.trim();
        if digits.len() != 10 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_contact(raw));
        }
        Ok(Self(digits.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ContactNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContactNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_ten_digits() {
        let number = ContactNumber::parse("1234567890").unwrap();
        assert_eq!(number.as_str(), "1234567890");
    }

    #[test]
    fn trims_whitespace_before_validating() {
        assert!(ContactNumber::parse(" 1234567890 ").is_ok());
    }

    #[test]
    fn rejects_wrong_lengths_and_non_digits() {
        for bad in ["12345", "12345678901", "12345abcde", "+123456789", ""] {
            let err = ContactNumber::parse(bad).unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidContactNumber(_)),
                "expected InvalidContactNumber for {bad:?}, got {err:?}"
            );
        }
    }
}
