use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use buynest_core::{ContactNumber, DomainError, ProductId, SupplierId};

/// Supplier linkage document.
///
/// One record per delivery/contract: `stock` is the quantity declared for
/// this linkage, not the product's running total. A supplier record never
/// exists without a backing product at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub supplier_id: SupplierId,
    pub product_id: ProductId,
    pub email: String,
    /// Contact person. Serialized as `Name` to preserve the document shape.
    #[serde(rename = "Name")]
    pub name: String,
    pub stock: i64,
    pub cost: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_no: Option<ContactNumber>,
    pub created_at: DateTime<Utc>,
}

/// Input for registering a supplier delivery against a product.
///
/// `supplier_id` holds the raw numeric fragment; `product_id` is the
/// canonical identifier of the product the delivery is for, as supplied by
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSupplier {
    pub supplier_id: String,
    pub product_id: String,
    pub email: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub cost: i64,
    #[serde(default)]
    pub contact_no: Option<String>,
}

impl NewSupplier {
    /// Field-presence precondition, checked before any lookup.
    pub fn require_fields(&self) -> Result<(), DomainError> {
        if self.supplier_id.trim().is_empty() {
            return Err(DomainError::missing_field("supplierId"));
        }
        if self.product_id.trim().is_empty() {
            return Err(DomainError::missing_field("productId"));
        }
        if self.email.trim().is_empty() {
            return Err(DomainError::missing_field("email"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::missing_field("Name"));
        }
        Ok(())
    }

    /// Mint the supplier identifier from the raw fragment.
    pub fn mint_id(&self) -> Result<SupplierId, DomainError> {
        SupplierId::mint(&self.supplier_id)
    }

    /// Parse the optional contact number. A blank value counts as absent.
    pub fn contact_number(&self) -> Result<Option<ContactNumber>, DomainError> {
        match self.contact_no.as_deref() {
            Some(raw) if !raw.trim().is_empty() => ContactNumber::parse(raw).map(Some),
            _ => Ok(None),
        }
    }

    /// Assemble the record to persist once every precondition has passed.
    pub fn into_record(
        self,
        supplier_id: SupplierId,
        product_id: ProductId,
        contact_no: Option<ContactNumber>,
        created_at: DateTime<Utc>,
    ) -> Supplier {
        Supplier {
            supplier_id,
            product_id,
            email: self.email,
            name: self.name,
            stock: self.stock,
            cost: self.cost,
            contact_no,
            created_at,
        }
    }
}
