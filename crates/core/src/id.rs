//! Canonical catalog identifiers minted from numeric fragments.
//!
//! Identifiers are derived from caller-supplied fragments rather than an
//! internal counter, so minting is deterministic and collision handling is
//! the storage layer's job (unique key on the identifier field).

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Nominal width of the numeral part of a canonical identifier.
///
/// Shorter fragments are zero-padded up to this width. The width is a floor,
/// not a cap: longer fragments keep all of their digits.
pub const FRAGMENT_WIDTH: usize = 5;

/// Mint a canonical identifier string from a raw numeric fragment.
///
/// The fragment is trimmed and must consist of one or more decimal digits:
/// no sign, no decimal point, nothing else. Padding applies to the numeral
/// string, not its integer value: `"42"` and `"00042"` mint the same
/// identifier, and `"123456"` keeps all six digits.
pub fn mint(prefix: &str, raw_fragment: &str) -> Result<String, DomainError> {
    let fragment = raw_fragment.trim();
    if fragment.is_empty() || !fragment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::invalid_fragment(raw_fragment));
    }
    Ok(format!("{prefix}{fragment:0>width$}", width = FRAGMENT_WIDTH))
}

/// Identifier of a product (`BYNPD` + zero-padded numeral).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

/// Identifier of a supplier linkage record (`BYNSP` + zero-padded numeral).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(String);

macro_rules! impl_canonical_id {
    ($t:ty, $prefix:literal, $name:literal) => {
        impl $t {
            pub const PREFIX: &'static str = $prefix;

            /// Mint the identifier from a raw numeric fragment.
            pub fn mint(raw_fragment: &str) -> Result<Self, DomainError> {
                mint($prefix, raw_fragment).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            /// Accepts only the canonical form: the prefix followed by at
            /// least [`FRAGMENT_WIDTH`] decimal digits.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let numerals = s.strip_prefix($prefix).ok_or_else(|| {
                    DomainError::invalid_id(format!("{}: missing '{}' prefix", $name, $prefix))
                })?;
                if numerals.len() < FRAGMENT_WIDTH
                    || !numerals.bytes().all(|b| b.is_ascii_digit())
                {
                    return Err(DomainError::invalid_id(format!(
                        "{}: malformed numeral part {numerals:?}",
                        $name
                    )));
                }
                Ok(Self(s.to_string()))
            }
        }
    };
}

impl_canonical_id!(ProductId, "BYNPD", "ProductId");
impl_canonical_id!(SupplierId, "BYNSP", "SupplierId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_pads_short_fragments_to_five_digits() {
        assert_eq!(mint("BYNPD", "42").unwrap(), "BYNPD00042");
        assert_eq!(mint("BYNSP", "7").unwrap(), "BYNSP00007");
        assert_eq!(mint("BYNPD", "12345").unwrap(), "BYNPD12345");
    }

    #[test]
    fn mint_preserves_fragments_longer_than_the_nominal_width() {
        assert_eq!(mint("BYNPD", "123456").unwrap(), "BYNPD123456");
        assert_eq!(mint("BYNSP", "000123456").unwrap(), "BYNSP000123456");
    }

    #[test]
    fn mint_trims_surrounding_whitespace() {
        assert_eq!(mint("BYNPD", "  42  ").unwrap(), "BYNPD00042");
    }

    #[test]
    fn mint_is_deterministic() {
        assert_eq!(mint("BYNPD", "42").unwrap(), mint("BYNPD", "42").unwrap());
    }

    #[test]
    fn mint_rejects_non_digit_fragments() {
        for bad in ["", "   ", "-42", "+42", "4.2", "42a", "a42", "4 2", "٤٢"] {
            let err = mint("BYNPD", bad).unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidFragment(_)),
                "expected InvalidFragment for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn typed_ids_mint_with_their_own_prefix() {
        assert_eq!(ProductId::mint("42").unwrap().as_str(), "BYNPD00042");
        assert_eq!(SupplierId::mint("42").unwrap().as_str(), "BYNSP00042");
    }

    #[test]
    fn parse_accepts_canonical_forms_only() {
        assert_eq!(
            "BYNPD00042".parse::<ProductId>().unwrap(),
            ProductId::mint("42").unwrap()
        );
        assert_eq!(
            "BYNPD123456".parse::<ProductId>().unwrap(),
            ProductId::mint("123456").unwrap()
        );

        assert!("BYNSP00042".parse::<ProductId>().is_err());
        assert!("BYNPD0042".parse::<ProductId>().is_err());
        assert!("BYNPD00a42".parse::<ProductId>().is_err());
        assert!("00042".parse::<ProductId>().is_err());
    }

    #[test]
    fn ids_serialize_as_bare_strings() {
        let id = ProductId::mint("42").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"BYNPD00042\"");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Fragments of up to five digits always pad to exactly five.
            #[test]
            fn short_fragments_pad_to_width(fragment in "[0-9]{1,5}") {
                let id = mint("BYNPD", &fragment).unwrap();
                prop_assert_eq!(id.len(), "BYNPD".len() + FRAGMENT_WIDTH);
                prop_assert!(id.ends_with(&fragment));
            }

            /// Fragments longer than five digits are preserved in full.
            #[test]
            fn long_fragments_are_not_truncated(fragment in "[0-9]{6,12}") {
                let id = mint("BYNPD", &fragment).unwrap();
                prop_assert_eq!(id, format!("BYNPD{fragment}"));
            }

            /// Anything containing a non-digit is rejected.
            #[test]
            fn non_digit_fragments_are_rejected(fragment in ".*[^0-9].*") {
                // The trim step may still rescue digit-only content wrapped
                // in whitespace; skip those inputs.
                prop_assume!(!fragment.trim().bytes().all(|b| b.is_ascii_digit())
                    || fragment.trim().is_empty());
                prop_assert!(mint("BYNPD", &fragment).is_err());
            }

            /// Minting never panics and is deterministic on arbitrary input.
            #[test]
            fn minting_is_total_and_deterministic(fragment in ".*") {
                let first = mint("BYNSP", &fragment);
                let second = mint("BYNSP", &fragment);
                prop_assert_eq!(first, second);
            }
        }
    }
}
