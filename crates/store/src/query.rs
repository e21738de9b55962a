//! Query and patch types for the catalog store.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use buynest_catalog::Product;
use buynest_core::ContactNumber;

/// Visibility scope for product reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Every product, hidden ones included (admin views).
    All,
    /// Only products flagged as available (public views).
    AvailableOnly,
}

/// Filter criteria for product listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub visibility: Visibility,
    /// Case-insensitive substring match on the product name.
    pub name_contains: Option<String>,
    /// Case-insensitive exact category membership.
    pub category: Option<String>,
}

impl ProductFilter {
    pub fn all() -> Self {
        Self {
            visibility: Visibility::All,
            name_contains: None,
            category: None,
        }
    }

    pub fn available_only() -> Self {
        Self {
            visibility: Visibility::AvailableOnly,
            name_contains: None,
            category: None,
        }
    }

    pub fn with_name_query(mut self, query: impl Into<String>) -> Self {
        self.name_contains = Some(query.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        if self.visibility == Visibility::AvailableOnly && !product.is_available {
            return false;
        }
        if let Some(query) = &self.name_contains {
            if !product.name_contains(query) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !product.in_category(category) {
                return false;
            }
        }
        true
    }
}

/// Partial update for a product. `None` fields are left untouched; the
/// identifier is immutable and has no patch field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub categories: Option<BTreeSet<String>>,
    pub images: Option<Vec<String>>,
    pub labelled_price: Option<i64>,
    pub price: Option<i64>,
    /// Administrative stock override (not a delivery; bypasses
    /// reconciliation by design of the surface API).
    pub stock: Option<i64>,
    pub is_available: Option<bool>,
}

impl ProductPatch {
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(categories) = self.categories {
            product.categories = categories;
        }
        if let Some(images) = self.images {
            product.images = images;
        }
        if let Some(labelled_price) = self.labelled_price {
            product.labelled_price = labelled_price;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(is_available) = self.is_available {
            product.is_available = is_available;
        }
    }
}

/// Partial update for a supplier. Updating `stock` here edits the declared
/// delivery quantity on the linkage record only; the linked product's
/// counter is not revisited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierPatch {
    pub email: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    pub stock: Option<i64>,
    pub cost: Option<i64>,
    pub contact_no: Option<ContactNumber>,
}

impl SupplierPatch {
    pub fn apply(self, supplier: &mut buynest_catalog::Supplier) {
        if let Some(email) = self.email {
            supplier.email = email;
        }
        if let Some(name) = self.name {
            supplier.name = name;
        }
        if let Some(stock) = self.stock {
            supplier.stock = stock;
        }
        if let Some(cost) = self.cost {
            supplier.cost = cost;
        }
        if let Some(contact_no) = self.contact_no {
            supplier.contact_no = Some(contact_no);
        }
    }
}
