use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::key::ProductKey;
use crate::models::{CartEntry, NewProduct, Product};

/// Data access for products and carts.
///
/// Store failures come back as [`crate::CatalogError::Database`]; the service
/// tags them with the operation that failed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All products in natural order
    async fn list_products(&self) -> CatalogResult<Vec<Product>>;

    /// All cart entries in natural order
    async fn list_carts(&self) -> CatalogResult<Vec<CartEntry>>;

    /// The product matching any form of `key`
    async fn find_product(&self, key: &ProductKey) -> CatalogResult<Option<Product>>;

    /// Any cart referencing `key` under any reference shape
    async fn find_linked_cart(&self, key: &ProductKey) -> CatalogResult<Option<CartEntry>>;

    /// Delete one product matching `key`; returns the deleted count
    async fn delete_product(&self, key: &ProductKey) -> CatalogResult<u64>;

    /// Insert products; returns the inserted count
    async fn insert_products(&self, products: Vec<NewProduct>) -> CatalogResult<u64>;

    /// Delete every product whose name is in `names`; returns the deleted count
    async fn delete_products_by_name(&self, names: &[String]) -> CatalogResult<u64>;
}
