use thiserror::Error;

use crate::principal::Principal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("unauthorized")]
    Unauthorized,
}

/// Require the admin capability for a mutating operation.
///
/// - No IO
/// - No panics
/// - No business logic (pure capability check)
///
/// An anonymous caller (`None`) fails the check like any non-admin.
pub fn require_admin(principal: Option<&Principal>) -> Result<(), AuthzError> {
    match principal {
        Some(p) if p.is_admin() => Ok(()),
        _ => Err(AuthzError::Unauthorized),
    }
}
