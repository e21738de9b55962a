//! `buynest-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure
//! concerns): canonical catalog identifiers and their minting rules, contact
//! value objects, and the deterministic domain error model.

pub mod contact;
pub mod error;
pub mod id;

pub use contact::ContactNumber;
pub use error::{DomainError, DomainResult};
pub use id::{FRAGMENT_WIDTH, ProductId, SupplierId, mint};
