//! `buynest-services` — catalog surface operations.
//!
//! This crate composes the collaborators (capability check, catalog store,
//! mail transport) into the business workflows: product registration,
//! supplier registration with stock reconciliation, catalog reads, and the
//! low-stock notification. Transport concerns (HTTP parsing, sessions,
//! the real database and mail carrier) stay outside.

pub mod error;
pub mod products;
pub mod suppliers;

pub use error::{OpsError, OpsResult};
pub use products::{NotificationReceipt, ProductService};
pub use suppliers::{SupplierRegistration, SupplierService};
