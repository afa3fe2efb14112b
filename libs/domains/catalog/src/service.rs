//! Catalog Service - listing and guarded deletion

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::{
    CatalogError, CatalogResult, DELETE_PRODUCT_FAILED, LIST_ALL_FAILED, LIST_CARTS_FAILED,
    LIST_PRODUCTS_FAILED, PRODUCT_NOT_DELETED, PRODUCT_NOT_FOUND,
};
use crate::key::ProductKey;
use crate::models::{CartEntry, CatalogSnapshot, DeleteOutcome, Product};
use crate::repository::CatalogRepository;
use crate::sample_data;

/// Catalog operations over a [`CatalogRepository`].
///
/// Every store failure surfaces as [`CatalogError::Store`] tagged with the
/// operation that failed. Nothing is retried.
pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        self.repository
            .list_products()
            .await
            .map_err(|e| e.in_context(LIST_PRODUCTS_FAILED))
    }

    #[instrument(skip(self))]
    pub async fn list_carts(&self) -> CatalogResult<Vec<CartEntry>> {
        self.repository
            .list_carts()
            .await
            .map_err(|e| e.in_context(LIST_CARTS_FAILED))
    }

    /// Products and carts from two independent queries; no snapshot isolation.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> CatalogResult<CatalogSnapshot> {
        let (productos, carrito) =
            tokio::try_join!(self.repository.list_products(), self.repository.list_carts())
                .map_err(|e| e.in_context(LIST_ALL_FAILED))?;

        Ok(CatalogSnapshot { productos, carrito })
    }

    /// Delete the product `raw_id` refers to, refusing when a cart still
    /// references it unless `force` is set.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, raw_id: &str, force: bool) -> CatalogResult<DeleteOutcome> {
        let key = ProductKey::parse(raw_id);
        self.delete_by_key(&key, force)
            .await
            .map_err(|e| e.in_context(DELETE_PRODUCT_FAILED))
    }

    async fn delete_by_key(&self, key: &ProductKey, force: bool) -> CatalogResult<DeleteOutcome> {
        let product = self
            .repository
            .find_product(key)
            .await?
            .ok_or_else(|| CatalogError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;

        let linked_cart = self.repository.find_linked_cart(key).await?;
        let linked = linked_cart.is_some();

        if linked && !force {
            warn!(
                id = %key.raw(),
                cart_id = ?linked_cart.as_ref().and_then(|c| c.id()),
                "Refusing to delete product referenced by a cart"
            );
            return Err(CatalogError::Linked);
        }

        let deleted = self.repository.delete_product(key).await?;
        if deleted == 0 {
            return Err(CatalogError::DeleteFailed(PRODUCT_NOT_DELETED.to_string()));
        }

        info!(
            id = %key.raw(),
            name = product.name().unwrap_or_default(),
            linked,
            forced = force,
            "Product deleted"
        );
        Ok(DeleteOutcome {
            deleted: true,
            linked,
        })
    }

    /// Insert the five sample products; returns how many were inserted.
    #[instrument(skip(self))]
    pub async fn seed_sample_products(&self) -> CatalogResult<u64> {
        let inserted = self
            .repository
            .insert_products(sample_data::sample_products())
            .await?;
        info!(inserted, "Sample products inserted");
        Ok(inserted)
    }

    /// Delete every product named like a sample product; returns how many were deleted.
    #[instrument(skip(self))]
    pub async fn clean_sample_products(&self) -> CatalogResult<u64> {
        let deleted = self
            .repository
            .delete_products_by_name(&sample_data::sample_product_names())
            .await?;
        info!(deleted, "Sample products removed");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCatalogRepository;
    use mockall::predicate::*;
    use mongodb::bson::{doc, oid::ObjectId};

    const HEX: &str = "65a1f0c2b4d3e8a9f7c61234";

    fn product(id: &str) -> Product {
        Product::from(doc! {
            "_id": ObjectId::parse_str(id).unwrap(),
            "nombre": "iPhone 15 Pro",
            "precio": 999.99,
            "stock": 20,
        })
    }

    fn cart_for(id: &str) -> CartEntry {
        CartEntry::from(doc! { "_id": ObjectId::new(), "productos": [id] })
    }

    #[tokio::test]
    async fn test_delete_unlinked_product() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_product()
            .with(eq(ProductKey::parse(HEX)))
            .returning(|_| Ok(Some(product(HEX))));
        repo.expect_find_linked_cart().returning(|_| Ok(None));
        repo.expect_delete_product().times(1).returning(|_| Ok(1));

        let service = CatalogService::new(repo);
        let outcome = service.delete_product(HEX, false).await.unwrap();

        assert_eq!(
            outcome,
            DeleteOutcome {
                deleted: true,
                linked: false
            }
        );
    }

    #[tokio::test]
    async fn test_delete_linked_product_without_force_is_refused() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_product()
            .returning(|_| Ok(Some(product(HEX))));
        repo.expect_find_linked_cart()
            .returning(|_| Ok(Some(cart_for(HEX))));
        repo.expect_delete_product().never();

        let service = CatalogService::new(repo);
        let err = service.delete_product(HEX, false).await.unwrap_err();

        assert!(matches!(err, CatalogError::Linked));
    }

    #[tokio::test]
    async fn test_delete_linked_product_with_force() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_product()
            .returning(|_| Ok(Some(product(HEX))));
        repo.expect_find_linked_cart()
            .returning(|_| Ok(Some(cart_for(HEX))));
        repo.expect_delete_product().times(1).returning(|_| Ok(1));

        let service = CatalogService::new(repo);
        let outcome = service.delete_product(HEX, true).await.unwrap();

        assert!(outcome.deleted);
        assert!(outcome.linked);
    }

    #[tokio::test]
    async fn test_delete_missing_product_skips_link_check() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_product().returning(|_| Ok(None));
        repo.expect_find_linked_cart().never();
        repo.expect_delete_product().never();

        let service = CatalogService::new(repo);
        let err = service.delete_product("no-such-id", false).await.unwrap_err();

        match err {
            CatalogError::NotFound(msg) => assert_eq!(msg, PRODUCT_NOT_FOUND),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_race_reports_delete_failed() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_product()
            .returning(|_| Ok(Some(product(HEX))));
        repo.expect_find_linked_cart().returning(|_| Ok(None));
        repo.expect_delete_product().returning(|_| Ok(0));

        let service = CatalogService::new(repo);
        let err = service.delete_product(HEX, false).await.unwrap_err();

        assert!(matches!(err, CatalogError::DeleteFailed(_)));
    }

    #[tokio::test]
    async fn test_delete_store_failure_is_tagged() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_find_product()
            .returning(|_| Ok(Some(product(HEX))));
        repo.expect_find_linked_cart()
            .returning(|_| Err(CatalogError::Database("not primary".into())));

        let service = CatalogService::new(repo);
        let err = service.delete_product(HEX, true).await.unwrap_err();

        match err {
            CatalogError::Store { context, details } => {
                assert_eq!(context, DELETE_PRODUCT_FAILED);
                assert_eq!(details, "not primary");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_products_failure_is_tagged() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_list_products()
            .returning(|| Err(CatalogError::Database("timeout".into())));

        let service = CatalogService::new(repo);
        let err = service.list_products().await.unwrap_err();

        assert!(matches!(
            err,
            CatalogError::Store {
                context: LIST_PRODUCTS_FAILED,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_list_all_combines_both_collections() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_list_products()
            .returning(|| Ok(vec![product(HEX)]));
        repo.expect_list_carts()
            .returning(|| Ok(vec![cart_for(HEX), cart_for("x")]));

        let service = CatalogService::new(repo);
        let snapshot = service.list_all().await.unwrap();

        assert_eq!(snapshot.productos.len(), 1);
        assert_eq!(snapshot.carrito.len(), 2);
    }

    #[tokio::test]
    async fn test_list_all_failure_uses_combined_context() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_list_products().returning(|| Ok(vec![]));
        repo.expect_list_carts()
            .returning(|| Err(CatalogError::Database("timeout".into())));

        let service = CatalogService::new(repo);
        let err = service.list_all().await.unwrap_err();

        assert_eq!(err.to_string(), format!("{LIST_ALL_FAILED}: timeout"));
    }

    #[tokio::test]
    async fn test_seed_inserts_five_samples() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_insert_products()
            .withf(|products| products.len() == 5 && products[1].name == "iPhone 15 Pro")
            .returning(|products| Ok(products.len() as u64));

        let service = CatalogService::new(repo);
        assert_eq!(service.seed_sample_products().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_clean_deletes_by_sample_names() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_delete_products_by_name()
            .withf(|names| names.len() == 5 && names.contains(&"AirPods Pro".to_string()))
            .returning(|_| Ok(3));

        let service = CatalogService::new(repo);
        assert_eq!(service.clean_sample_products().await.unwrap(), 3);
    }
}
