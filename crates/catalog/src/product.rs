use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use buynest_core::{DomainError, ProductId};

/// Catalog product document.
///
/// `stock` is the running counter: it grows through the store's delivery
/// primitive when a supplier registers, and is otherwise only touched by
/// administrative patches. `product_id` is immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub categories: BTreeSet<String>,
    pub images: Vec<String>,
    /// Displayed (pre-discount) price in the smallest currency unit.
    pub labelled_price: i64,
    /// Selling price in the smallest currency unit. Signedness is not
    /// policed here.
    pub price: i64,
    pub stock: i64,
    /// Visibility flag: non-admin views only see available products.
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Case-insensitive substring match on the product name (catalog search).
    pub fn name_contains(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// Case-insensitive exact category membership.
    pub fn in_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }
}

fn default_available() -> bool {
    true
}

/// Input for registering a product.
///
/// `product_id` holds the raw numeric fragment, not the canonical
/// identifier; minting happens in [`NewProduct::finalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub labelled_price: i64,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

impl NewProduct {
    /// Validate the input and mint the canonical identifier.
    ///
    /// Pure: uniqueness against live products is the store's check.
    pub fn finalize(self, created_at: DateTime<Utc>) -> Result<Product, DomainError> {
        if self.product_id.trim().is_empty() {
            return Err(DomainError::missing_field("productId"));
        }
        let product_id = ProductId::mint(&self.product_id)?;

        Ok(Product {
            product_id,
            name: self.name,
            description: self.description,
            categories: self.categories,
            images: self.images,
            labelled_price: self.labelled_price,
            price: self.price,
            stock: self.stock,
            is_available: self.is_available,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(fragment: &str) -> NewProduct {
        NewProduct {
            product_id: fragment.to_string(),
            name: "Ceylon Tea 500g".to_string(),
            description: "Loose leaf".to_string(),
            categories: BTreeSet::from(["Groceries".to_string()]),
            images: vec!["https://cdn.example/tea.png".to_string()],
            labelled_price: 2_500,
            price: 1_990,
            stock: 10,
            is_available: true,
        }
    }

    #[test]
    fn finalize_mints_the_canonical_identifier() {
        let product = input("42").finalize(Utc::now()).unwrap();
        assert_eq!(product.product_id.as_str(), "BYNPD00042");
        assert_eq!(product.name, "Ceylon Tea 500g");
        assert_eq!(product.stock, 10);
    }

    #[test]
    fn finalize_rejects_blank_fragment_as_missing_field() {
        let err = input("   ").finalize(Utc::now()).unwrap_err();
        assert_eq!(err, DomainError::MissingField("productId"));
    }

    #[test]
    fn finalize_rejects_non_digit_fragment() {
        let err = input("42a").finalize(Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidFragment(_)));
    }

    #[test]
    fn search_matching_is_case_insensitive() {
        let product = input("42").finalize(Utc::now()).unwrap();
        assert!(product.name_contains("ceylon"));
        assert!(product.name_contains("TEA"));
        assert!(!product.name_contains("coffee"));
    }

    #[test]
    fn category_matching_is_case_insensitive_and_exact() {
        let product = input("42").finalize(Utc::now()).unwrap();
        assert!(product.in_category("groceries"));
        assert!(product.in_category("GROCERIES"));
        assert!(!product.in_category("grocerie"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any digit fragment finalizes into an id carrying the padded
            /// numeral, regardless of the other fields.
            #[test]
            fn digit_fragments_always_finalize(fragment in "[0-9]{1,10}") {
                let product = input(&fragment).finalize(Utc::now()).unwrap();
                prop_assert!(product.product_id.as_str().starts_with("BYNPD"));
                prop_assert!(product.product_id.as_str().ends_with(fragment.as_str()));
            }
        }
    }
}
