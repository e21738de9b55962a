//! `buynest-catalog` — product and supplier catalog records.
//!
//! Records are plain documents keyed by canonical identifiers. Registration
//! inputs carry raw fragments and perform the pure (I/O-free) slice of the
//! registration preconditions; existence and uniqueness checks live behind
//! the storage boundary.

pub mod product;
pub mod supplier;

pub use product::{NewProduct, Product};
pub use supplier::{NewSupplier, Supplier};
