//! MongoDB implementation of CatalogRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{bson::doc, Collection, Database};
use tracing::instrument;

use crate::error::CatalogResult;
use crate::key::ProductKey;
use crate::models::{CartEntry, NewProduct, Product};
use crate::repository::CatalogRepository;

pub const PRODUCTS_COLLECTION: &str = "productos";
pub const CARTS_COLLECTION: &str = "carrito";

/// MongoDB implementation of the CatalogRepository
#[derive(Clone)]
pub struct MongoCatalogRepository {
    products: Collection<Product>,
    carts: Collection<CartEntry>,
}

impl MongoCatalogRepository {
    /// Repository over the `productos` and `carrito` collections
    pub fn new(db: &Database) -> Self {
        Self::with_collections(db, PRODUCTS_COLLECTION, CARTS_COLLECTION)
    }

    /// Repository over custom collection names
    pub fn with_collections(db: &Database, products: &str, carts: &str) -> Self {
        Self {
            products: db.collection::<Product>(products),
            carts: db.collection::<CartEntry>(carts),
        }
    }
}

#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    #[instrument(skip(self))]
    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let cursor = self.products.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self))]
    async fn list_carts(&self) -> CatalogResult<Vec<CartEntry>> {
        let cursor = self.carts.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self), fields(id = %key.raw()))]
    async fn find_product(&self, key: &ProductKey) -> CatalogResult<Option<Product>> {
        Ok(self.products.find_one(key.id_filter()).await?)
    }

    #[instrument(skip(self), fields(id = %key.raw()))]
    async fn find_linked_cart(&self, key: &ProductKey) -> CatalogResult<Option<CartEntry>> {
        Ok(self.carts.find_one(key.link_filter()).await?)
    }

    #[instrument(skip(self), fields(id = %key.raw()))]
    async fn delete_product(&self, key: &ProductKey) -> CatalogResult<u64> {
        let result = self.products.delete_one(key.id_filter()).await?;
        Ok(result.deleted_count)
    }

    #[instrument(skip(self, products), fields(count = products.len()))]
    async fn insert_products(&self, products: Vec<NewProduct>) -> CatalogResult<u64> {
        if products.is_empty() {
            return Ok(0);
        }

        let result = self
            .products
            .clone_with_type::<NewProduct>()
            .insert_many(products)
            .await?;
        Ok(result.inserted_ids.len() as u64)
    }

    #[instrument(skip(self))]
    async fn delete_products_by_name(&self, names: &[String]) -> CatalogResult<u64> {
        let result = self
            .products
            .delete_many(doc! { "nombre": { "$in": names.to_vec() } })
            .await?;
        Ok(result.deleted_count)
    }
}
