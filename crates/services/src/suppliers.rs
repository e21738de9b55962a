use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use buynest_auth::{Principal, require_admin};
use buynest_catalog::{NewSupplier, Product, Supplier};
use buynest_core::SupplierId;
use buynest_store::{CatalogStore, SupplierPatch};

use crate::error::{OpsError, OpsResult};
use crate::products::resolve_product_id;

fn resolve_supplier_id(raw: &str) -> OpsResult<SupplierId> {
    raw.trim()
        .parse()
        .map_err(|_| OpsError::SupplierNotFound(raw.to_string()))
}

/// Outcome of a supplier registration: the persisted linkage record and the
/// product whose stock it was reconciled into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRegistration {
    pub supplier: Supplier,
    pub product: Product,
}

/// Supplier-side surface operations, including the stock reconciliation
/// that links a delivery to its product.
pub struct SupplierService {
    store: Arc<dyn CatalogStore>,
}

impl SupplierService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Register a supplier delivery against an existing product.
    ///
    /// Preconditions run in order, each with its own failure: required
    /// fields, backing product, digit-only fragment, identifier uniqueness,
    /// contact-number format. Only then does the store apply the stock
    /// increment and the supplier insert as one unit.
    pub async fn register(
        &self,
        principal: Option<&Principal>,
        input: NewSupplier,
    ) -> OpsResult<SupplierRegistration> {
        require_admin(principal)?;
        input.require_fields()?;

        let product_id = resolve_product_id(&input.product_id)?;
        if self
            .store
            .find_product(&product_id)
            .await
            .map_err(|e| OpsError::from_store("find_product", e))?
            .is_none()
        {
            return Err(OpsError::ProductNotFound(input.product_id.clone()));
        }

        let supplier_id = input.mint_id()?;

        // Pre-check for a friendlier failure; the storage constraint inside
        // apply_delivery decides a race.
        if self
            .store
            .find_supplier(&supplier_id)
            .await
            .map_err(|e| OpsError::from_store("find_supplier", e))?
            .is_some()
        {
            return Err(OpsError::DuplicateIdentifier(supplier_id.to_string()));
        }

        let contact_no = input.contact_number()?;

        let record = input.into_record(supplier_id, product_id, contact_no, Utc::now());
        let (product, supplier) = self
            .store
            .apply_delivery(record)
            .await
            .map_err(|e| OpsError::from_store("apply_delivery", e))?;

        info!(
            supplier_id = %supplier.supplier_id,
            product_id = %product.product_id,
            delivered = supplier.stock,
            stock = product.stock,
            "supplier registered, stock reconciled"
        );
        Ok(SupplierRegistration { supplier, product })
    }

    /// All suppliers, newest first.
    pub async fn list(&self, principal: Option<&Principal>) -> OpsResult<Vec<Supplier>> {
        require_admin(principal)?;
        self.store
            .list_suppliers()
            .await
            .map_err(|e| OpsError::from_store("list_suppliers", e))
    }

    /// Patch a supplier record. Never re-triggers reconciliation: editing
    /// the declared quantity does not revisit the product counter.
    pub async fn update(
        &self,
        principal: Option<&Principal>,
        supplier_id: &str,
        patch: SupplierPatch,
    ) -> OpsResult<Supplier> {
        require_admin(principal)?;
        let id = resolve_supplier_id(supplier_id)?;
        let updated = self
            .store
            .update_supplier(&id, patch)
            .await
            .map_err(|e| OpsError::from_store("update_supplier", e))?
            .ok_or_else(|| OpsError::SupplierNotFound(supplier_id.to_string()))?;
        info!(supplier_id = %updated.supplier_id, "supplier updated");
        Ok(updated)
    }

    pub async fn delete(&self, principal: Option<&Principal>, supplier_id: &str) -> OpsResult<()> {
        require_admin(principal)?;
        let id = resolve_supplier_id(supplier_id)?;
        let deleted = self
            .store
            .delete_supplier(&id)
            .await
            .map_err(|e| OpsError::from_store("delete_supplier", e))?;
        if !deleted {
            return Err(OpsError::SupplierNotFound(supplier_id.to_string()));
        }
        info!(supplier_id = %id, "supplier deleted");
        Ok(())
    }
}
