//! `buynest-auth` — principal identity and capability checks.
//!
//! Authentication itself happens elsewhere; this crate only models the
//! already-authenticated principal and the admin capability check every
//! mutating catalog operation is gated on.

pub mod authorize;
pub mod principal;

pub use authorize::{AuthzError, require_admin};
pub use principal::{Principal, Role, UserId};
