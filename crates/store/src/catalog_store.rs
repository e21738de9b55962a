use async_trait::async_trait;
use thiserror::Error;

use buynest_catalog::{Product, Supplier};
use buynest_core::{ProductId, SupplierId};

use crate::query::{ProductFilter, ProductPatch, SupplierPatch};

/// Store operation error.
///
/// These are persistence-boundary failures, kept separate from the
/// deterministic domain errors in `buynest-core`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique-key constraint rejected an insert.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// A delivery referenced a product that does not exist.
    #[error("no product backs the delivery: {0}")]
    MissingProduct(String),

    /// A stock mutation would drive the counter below zero.
    #[error("stock cannot go negative for {0}")]
    StockUnderflow(String),

    /// Collaborator-level fault (connectivity, poisoned locks, ...).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-indexed document store for the product catalog and its supplier
/// linkages. Keys are the canonical identifiers.
///
/// Implementations own the mechanism behind two contracts:
///
/// - **Uniqueness**: inserts reject duplicate canonical identifiers with
///   [`StoreError::DuplicateKey`]. Under concurrent registration with the
///   same identifier, at most one insert wins, regardless of any pre-check
///   the caller performed.
/// - **Delivery atomicity**: [`CatalogStore::apply_delivery`] increments the
///   backing product's stock and inserts the supplier record as one unit.
///   Readers never observe one side without the other, and concurrent
///   deliveries against the same product serialize their increments (a
///   read-modify-write must not lose updates). The mechanism is the
///   adapter's choice: a transaction, a conditional write, or a single
///   critical section all satisfy the contract.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert a product. Rejects an already-used identifier.
    async fn insert_product(&self, product: Product) -> StoreResult<()>;

    async fn find_product(&self, id: &ProductId) -> StoreResult<Option<Product>>;

    /// List products matching the filter, oldest first.
    async fn list_products(&self, filter: ProductFilter) -> StoreResult<Vec<Product>>;

    /// Apply a patch to a product. `Ok(None)` when the product is absent.
    async fn update_product(
        &self,
        id: &ProductId,
        patch: ProductPatch,
    ) -> StoreResult<Option<Product>>;

    /// Delete a product by identifier. Returns whether a record existed.
    async fn delete_product(&self, id: &ProductId) -> StoreResult<bool>;

    /// Atomically add the supplier's declared quantity to the backing
    /// product's stock and persist the supplier record.
    ///
    /// Fails with [`StoreError::MissingProduct`] when the linkage has no
    /// backing product, [`StoreError::DuplicateKey`] when the supplier
    /// identifier is already taken, and [`StoreError::StockUnderflow`] when
    /// the delivery would leave the counter negative. On failure nothing is
    /// written.
    async fn apply_delivery(&self, supplier: Supplier) -> StoreResult<(Product, Supplier)>;

    async fn find_supplier(&self, id: &SupplierId) -> StoreResult<Option<Supplier>>;

    /// The most recently created supplier linked to the given product.
    async fn latest_supplier_for_product(
        &self,
        product_id: &ProductId,
    ) -> StoreResult<Option<Supplier>>;

    /// All suppliers, newest first.
    async fn list_suppliers(&self) -> StoreResult<Vec<Supplier>>;

    /// Apply a patch to a supplier. `Ok(None)` when the supplier is absent.
    /// Never re-triggers delivery reconciliation.
    async fn update_supplier(
        &self,
        id: &SupplierId,
        patch: SupplierPatch,
    ) -> StoreResult<Option<Supplier>>;

    /// Delete a supplier by identifier. Returns whether a record existed.
    async fn delete_supplier(&self, id: &SupplierId) -> StoreResult<bool>;
}
