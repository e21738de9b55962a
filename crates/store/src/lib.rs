//! `buynest-store` — catalog persistence boundary.
//!
//! The catalog treats its document database as an external collaborator:
//! a key-indexed store with find/insert/update/delete plus two contracts the
//! registration workflows depend on (identifier uniqueness and atomic
//! delivery reconciliation). This crate defines that contract and ships the
//! in-memory adapter used by tests and development.

pub mod catalog_store;
pub mod in_memory;
pub mod query;

pub use catalog_store::{CatalogStore, StoreError, StoreResult};
pub use in_memory::InMemoryCatalogStore;
pub use query::{ProductFilter, ProductPatch, SupplierPatch, Visibility};
