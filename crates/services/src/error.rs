use thiserror::Error;

use buynest_auth::AuthzError;
use buynest_core::DomainError;
use buynest_store::StoreError;

pub type OpsResult<T> = Result<T, OpsError>;

/// Caller-visible failure taxonomy of the surface operations.
///
/// Authorization, validation, not-found and duplicate failures are all
/// detected before any mutation. Only `DeliveryFailed` and `Storage` can
/// surface after a partial write; both carry the entity and stage so the
/// caller can reconcile manually. There are no compensating transactions
/// here.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Capability check failed; no side effects.
    #[error("unauthorized")]
    Unauthorized,

    /// Malformed input (missing field, non-digit fragment, bad contact
    /// number); no side effects.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// No product lives under the given identifier.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// No supplier resolves for the operation (by identifier, or linked to
    /// the product being notified about).
    #[error("supplier not found: {0}")]
    SupplierNotFound(String),

    /// The minted identifier is already in use, caught by the pre-check or
    /// by the storage layer's uniqueness constraint.
    #[error("identifier already exists: {0}")]
    DuplicateIdentifier(String),

    /// The mail transport reported non-success. Nothing is retried and any
    /// triggering write has already committed.
    #[error("delivery to {to} failed for supplier {supplier_id}: {reason}")]
    DeliveryFailed {
        supplier_id: String,
        to: String,
        reason: String,
    },

    /// Storage collaborator fault, propagated with the failing stage.
    #[error("storage failure during {stage}: {source}")]
    Storage {
        stage: &'static str,
        #[source]
        source: StoreError,
    },
}

impl From<AuthzError> for OpsError {
    fn from(_: AuthzError) -> Self {
        Self::Unauthorized
    }
}

impl OpsError {
    /// Map a store fault raised at `stage`, folding duplicate-key and
    /// missing-product rejections back into their caller-visible forms so a
    /// race lost at the storage constraint reads the same as one caught by
    /// the pre-check.
    pub(crate) fn from_store(stage: &'static str, err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(key) => Self::DuplicateIdentifier(key),
            StoreError::MissingProduct(id) => Self::ProductNotFound(id),
            other => Self::Storage {
                stage,
                source: other,
            },
        }
    }
}
