//! In-memory catalog store.
//!
//! Intended for tests/dev. A single `RwLock` guards both document maps, so
//! the delivery primitive runs as one critical section: the stock increment
//! and the supplier insert become visible together, and deliveries against
//! the same product serialize on the write lock.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use buynest_catalog::{Product, Supplier};
use buynest_core::{ProductId, SupplierId};

use crate::catalog_store::{CatalogStore, StoreError, StoreResult};
use crate::query::{ProductFilter, ProductPatch, SupplierPatch};

#[derive(Debug, Clone)]
struct StoredSupplier {
    record: Supplier,
    /// Monotonic insert counter; tie-break when creation timestamps collide.
    seq: u64,
}

#[derive(Debug, Default)]
struct Documents {
    products: HashMap<ProductId, Product>,
    suppliers: HashMap<SupplierId, StoredSupplier>,
    next_seq: u64,
}

/// In-memory document store keyed by canonical identifiers.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    docs: RwLock<Documents>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Documents>> {
        self.docs
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Documents>> {
        self.docs
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn insert_product(&self, product: Product) -> StoreResult<()> {
        let mut docs = self.write()?;
        if docs.products.contains_key(&product.product_id) {
            return Err(StoreError::DuplicateKey(product.product_id.to_string()));
        }
        docs.products.insert(product.product_id.clone(), product);
        Ok(())
    }

    async fn find_product(&self, id: &ProductId) -> StoreResult<Option<Product>> {
        Ok(self.read()?.products.get(id).cloned())
    }

    async fn list_products(&self, filter: ProductFilter) -> StoreResult<Vec<Product>> {
        let docs = self.read()?;
        let mut products: Vec<Product> = docs
            .products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        products.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        Ok(products)
    }

    async fn update_product(
        &self,
        id: &ProductId,
        patch: ProductPatch,
    ) -> StoreResult<Option<Product>> {
        let mut docs = self.write()?;
        let Some(product) = docs.products.get_mut(id) else {
            return Ok(None);
        };
        patch.apply(product);
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: &ProductId) -> StoreResult<bool> {
        Ok(self.write()?.products.remove(id).is_some())
    }

    async fn apply_delivery(&self, supplier: Supplier) -> StoreResult<(Product, Supplier)> {
        let mut docs = self.write()?;
        let Documents {
            products,
            suppliers,
            next_seq,
        } = &mut *docs;

        let product = products
            .get_mut(&supplier.product_id)
            .ok_or_else(|| StoreError::MissingProduct(supplier.product_id.to_string()))?;
        if suppliers.contains_key(&supplier.supplier_id) {
            return Err(StoreError::DuplicateKey(supplier.supplier_id.to_string()));
        }
        let new_stock = product.stock.checked_add(supplier.stock).ok_or_else(|| {
            StoreError::Backend(format!("stock overflow for {}", supplier.product_id))
        })?;
        if new_stock < 0 {
            return Err(StoreError::StockUnderflow(supplier.product_id.to_string()));
        }

        // Every check passed; the increment and the insert commit together
        // under the same write guard.
        product.stock = new_stock;
        let updated = product.clone();

        *next_seq += 1;
        let seq = *next_seq;
        suppliers.insert(
            supplier.supplier_id.clone(),
            StoredSupplier {
                record: supplier.clone(),
                seq,
            },
        );

        Ok((updated, supplier))
    }

    async fn find_supplier(&self, id: &SupplierId) -> StoreResult<Option<Supplier>> {
        Ok(self.read()?.suppliers.get(id).map(|s| s.record.clone()))
    }

    async fn latest_supplier_for_product(
        &self,
        product_id: &ProductId,
    ) -> StoreResult<Option<Supplier>> {
        let docs = self.read()?;
        Ok(docs
            .suppliers
            .values()
            .filter(|s| &s.record.product_id == product_id)
            .max_by_key(|s| (s.record.created_at, s.seq))
            .map(|s| s.record.clone()))
    }

    async fn list_suppliers(&self) -> StoreResult<Vec<Supplier>> {
        let docs = self.read()?;
        let mut stored: Vec<&StoredSupplier> = docs.suppliers.values().collect();
        stored.sort_by_key(|s| std::cmp::Reverse((s.record.created_at, s.seq)));
        Ok(stored.into_iter().map(|s| s.record.clone()).collect())
    }

    async fn update_supplier(
        &self,
        id: &SupplierId,
        patch: SupplierPatch,
    ) -> StoreResult<Option<Supplier>> {
        let mut docs = self.write()?;
        let Some(stored) = docs.suppliers.get_mut(id) else {
            return Ok(None);
        };
        patch.apply(&mut stored.record);
        Ok(Some(stored.record.clone()))
    }

    async fn delete_supplier(&self, id: &SupplierId) -> StoreResult<bool> {
        Ok(self.write()?.suppliers.remove(id).is_some())
    }
}
