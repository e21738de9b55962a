use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use buynest_auth::{Principal, require_admin};
use buynest_catalog::{NewProduct, Product};
use buynest_core::{DomainError, ProductId, SupplierId};
use buynest_notify::{Mailer, OutboundEmail, low_stock_alert, resupply_subject};
use buynest_store::{CatalogStore, ProductFilter, ProductPatch};

use crate::error::{OpsError, OpsResult};

/// Resolve a caller-supplied product identifier string.
///
/// A string that does not even parse as a canonical identifier cannot name
/// a live product, so it reads as not-found rather than a validation error.
pub(crate) fn resolve_product_id(raw: &str) -> OpsResult<ProductId> {
    raw.trim()
        .parse()
        .map_err(|_| OpsError::ProductNotFound(raw.to_string()))
}

/// Proof of a dispatched low-stock alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationReceipt {
    pub product_id: ProductId,
    pub supplier_id: SupplierId,
    pub to: String,
    pub subject: String,
}

/// Product-side surface operations.
pub struct ProductService {
    store: Arc<dyn CatalogStore>,
    mailer: Arc<dyn Mailer>,
}

impl ProductService {
    pub fn new(store: Arc<dyn CatalogStore>, mailer: Arc<dyn Mailer>) -> Self {
        Self { store, mailer }
    }

    /// Visibility scope for reads: admins see everything, everyone else
    /// only available products.
    fn scope(principal: Option<&Principal>) -> ProductFilter {
        match principal {
            Some(p) if p.is_admin() => ProductFilter::all(),
            _ => ProductFilter::available_only(),
        }
    }

    /// Register a product under a freshly minted identifier.
    ///
    /// No stock side effect: the counter starts at whatever the input
    /// declares and only grows through supplier deliveries from there.
    pub async fn register(
        &self,
        principal: Option<&Principal>,
        input: NewProduct,
    ) -> OpsResult<Product> {
        require_admin(principal)?;
        let product = input.finalize(Utc::now())?;

        // Pre-check for a friendlier failure; the storage constraint is
        // what actually decides a race.
        if self
            .store
            .find_product(&product.product_id)
            .await
            .map_err(|e| OpsError::from_store("find_product", e))?
            .is_some()
        {
            return Err(OpsError::DuplicateIdentifier(product.product_id.to_string()));
        }

        self.store
            .insert_product(product.clone())
            .await
            .map_err(|e| OpsError::from_store("insert_product", e))?;
        info!(product_id = %product.product_id, "product registered");
        Ok(product)
    }

    pub async fn list(&self, principal: Option<&Principal>) -> OpsResult<Vec<Product>> {
        self.store
            .list_products(Self::scope(principal))
            .await
            .map_err(|e| OpsError::from_store("list_products", e))
    }

    /// Case-insensitive name search. A blank query matches nothing.
    pub async fn search(
        &self,
        principal: Option<&Principal>,
        query: &str,
    ) -> OpsResult<Vec<Product>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        self.store
            .list_products(Self::scope(principal).with_name_query(query))
            .await
            .map_err(|e| OpsError::from_store("list_products", e))
    }

    /// Case-insensitive exact category listing.
    pub async fn list_by_category(
        &self,
        principal: Option<&Principal>,
        category: &str,
    ) -> OpsResult<Vec<Product>> {
        if category.trim().is_empty() {
            return Err(DomainError::missing_field("category").into());
        }
        self.store
            .list_products(Self::scope(principal).with_category(category.trim()))
            .await
            .map_err(|e| OpsError::from_store("list_products", e))
    }

    pub async fn get(&self, product_id: &str) -> OpsResult<Product> {
        let id = resolve_product_id(product_id)?;
        self.store
            .find_product(&id)
            .await
            .map_err(|e| OpsError::from_store("find_product", e))?
            .ok_or_else(|| OpsError::ProductNotFound(product_id.to_string()))
    }

    pub async fn update(
        &self,
        principal: Option<&Principal>,
        product_id: &str,
        patch: ProductPatch,
    ) -> OpsResult<Product> {
        require_admin(principal)?;
        let id = resolve_product_id(product_id)?;
        let updated = self
            .store
            .update_product(&id, patch)
            .await
            .map_err(|e| OpsError::from_store("update_product", e))?
            .ok_or_else(|| OpsError::ProductNotFound(product_id.to_string()))?;
        info!(product_id = %updated.product_id, "product updated");
        Ok(updated)
    }

    pub async fn delete(&self, principal: Option<&Principal>, product_id: &str) -> OpsResult<()> {
        require_admin(principal)?;
        let id = resolve_product_id(product_id)?;
        let deleted = self
            .store
            .delete_product(&id)
            .await
            .map_err(|e| OpsError::from_store("delete_product", e))?;
        if !deleted {
            return Err(OpsError::ProductNotFound(product_id.to_string()));
        }
        info!(product_id = %id, "product deleted");
        Ok(())
    }

    /// Low-stock notification workflow.
    ///
    /// Resolves the product, then its most recently created supplier
    /// linkage; fails closed when either side is missing. Exactly one
    /// message is handed to the mail collaborator; a non-accepted status is
    /// surfaced, not retried.
    pub async fn notify_supplier(
        &self,
        principal: Option<&Principal>,
        product_id: &str,
    ) -> OpsResult<NotificationReceipt> {
        require_admin(principal)?;
        let id = resolve_product_id(product_id)?;
        let product = self
            .store
            .find_product(&id)
            .await
            .map_err(|e| OpsError::from_store("find_product", e))?
            .ok_or_else(|| OpsError::ProductNotFound(product_id.to_string()))?;
        let supplier = self
            .store
            .latest_supplier_for_product(&product.product_id)
            .await
            .map_err(|e| OpsError::from_store("latest_supplier_for_product", e))?
            .ok_or_else(|| OpsError::SupplierNotFound(product_id.to_string()))?;

        let email = OutboundEmail::new(
            supplier.email.clone(),
            resupply_subject(&product),
            low_stock_alert(&supplier, &product),
        );
        let status = self.mailer.send(&email).await.map_err(|e| {
            warn!(supplier_id = %supplier.supplier_id, "mail transport errored");
            OpsError::DeliveryFailed {
                supplier_id: supplier.supplier_id.to_string(),
                to: supplier.email.clone(),
                reason: e.to_string(),
            }
        })?;
        if !status.is_accepted() {
            warn!(supplier_id = %supplier.supplier_id, ?status, "mail transport refused the alert");
            return Err(OpsError::DeliveryFailed {
                supplier_id: supplier.supplier_id.to_string(),
                to: supplier.email.clone(),
                reason: format!("transport reported {status:?}"),
            });
        }

        info!(
            product_id = %product.product_id,
            supplier_id = %supplier.supplier_id,
            stock = product.stock,
            "low-stock alert delivered"
        );
        Ok(NotificationReceipt {
            product_id: product.product_id,
            supplier_id: supplier.supplier_id,
            to: supplier.email,
            subject: email.subject,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use buynest_auth::{Role, UserId};
    use buynest_notify::RecordingMailer;
    use buynest_store::InMemoryCatalogStore;

    use super::*;

    fn admin() -> Principal {
        Principal::new(UserId::new(), Role::Admin)
    }

    fn customer() -> Principal {
        Principal::new(UserId::new(), Role::Customer)
    }

    fn service() -> (ProductService, Arc<InMemoryCatalogStore>, Arc<RecordingMailer>) {
        let store = Arc::new(InMemoryCatalogStore::new());
        let mailer = Arc::new(RecordingMailer::new());
        (
            ProductService::new(store.clone(), mailer.clone()),
            store,
            mailer,
        )
    }

    fn new_product(fragment: &str, name: &str, available: bool) -> NewProduct {
        NewProduct {
            product_id: fragment.to_string(),
            name: name.to_string(),
            description: String::new(),
            categories: BTreeSet::from(["tea".to_string()]),
            images: Vec::new(),
            labelled_price: 2_500,
            price: 1_990,
            stock: 4,
            is_available: available,
        }
    }

    #[tokio::test]
    async fn register_mints_and_persists() {
        let (service, _, _) = service();
        let product = service
            .register(Some(&admin()), new_product("42", "Ceylon Tea", true))
            .await
            .unwrap();
        assert_eq!(product.product_id.as_str(), "BYNPD00042");

        let fetched = service.get("BYNPD00042").await.unwrap();
        assert_eq!(fetched, product);
    }

    #[tokio::test]
    async fn register_requires_the_admin_capability() {
        let (service, store, _) = service();
        for principal in [None, Some(customer())] {
            let err = service
                .register(principal.as_ref(), new_product("42", "Ceylon Tea", true))
                .await
                .unwrap_err();
            assert!(matches!(err, OpsError::Unauthorized));
        }
        assert!(
            store
                .list_products(ProductFilter::all())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn register_rejects_duplicate_identifiers() {
        let (service, _, _) = service();
        service
            .register(Some(&admin()), new_product("42", "Ceylon Tea", true))
            .await
            .unwrap();

        // Same numeral under a different spelling still collides.
        let err = service
            .register(Some(&admin()), new_product("042", "Other Tea", true))
            .await
            .unwrap_err();
        assert!(matches!(err, OpsError::DuplicateIdentifier(id) if id == "BYNPD00042"));
    }

    #[tokio::test]
    async fn listing_and_search_hide_unavailable_products_from_non_admins() {
        let (service, _, _) = service();
        let admin = admin();
        service
            .register(Some(&admin), new_product("1", "Ceylon Tea", true))
            .await
            .unwrap();
        service
            .register(Some(&admin), new_product("2", "Hidden Tea", false))
            .await
            .unwrap();

        assert_eq!(service.list(Some(&admin)).await.unwrap().len(), 2);
        assert_eq!(service.list(None).await.unwrap().len(), 1);

        assert_eq!(service.search(Some(&admin), "tea").await.unwrap().len(), 2);
        assert_eq!(service.search(None, "tea").await.unwrap().len(), 1);
        assert!(service.search(Some(&admin), "   ").await.unwrap().is_empty());

        assert_eq!(
            service.list_by_category(None, "TEA").await.unwrap().len(),
            1
        );
        let err = service.list_by_category(None, " ").await.unwrap_err();
        assert!(matches!(
            err,
            OpsError::Validation(DomainError::MissingField("category"))
        ));
    }

    #[tokio::test]
    async fn get_update_delete_report_missing_products() {
        let (service, _, _) = service();
        let admin = admin();

        assert!(matches!(
            service.get("BYNPD00042").await.unwrap_err(),
            OpsError::ProductNotFound(_)
        ));
        // Malformed identifiers cannot name a live product.
        assert!(matches!(
            service.get("not-an-id").await.unwrap_err(),
            OpsError::ProductNotFound(_)
        ));
        assert!(matches!(
            service
                .update(Some(&admin), "BYNPD00042", ProductPatch::default())
                .await
                .unwrap_err(),
            OpsError::ProductNotFound(_)
        ));
        assert!(matches!(
            service.delete(Some(&admin), "BYNPD00042").await.unwrap_err(),
            OpsError::ProductNotFound(_)
        ));
    }

    #[tokio::test]
    async fn notify_without_linked_supplier_sends_nothing() {
        let (service, _, mailer) = service();
        let admin = admin();
        service
            .register(Some(&admin), new_product("42", "Ceylon Tea", true))
            .await
            .unwrap();

        let err = service
            .notify_supplier(Some(&admin), "BYNPD00042")
            .await
            .unwrap_err();
        assert!(matches!(err, OpsError::SupplierNotFound(_)));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn notify_is_gated_on_the_admin_capability() {
        let (service, _, mailer) = service();
        let err = service
            .notify_supplier(Some(&customer()), "BYNPD00042")
            .await
            .unwrap_err();
        assert!(matches!(err, OpsError::Unauthorized));
        assert!(mailer.sent().is_empty());
    }
}
