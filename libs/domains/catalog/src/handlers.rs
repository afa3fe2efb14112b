//! HTTP handlers for the Catalog API

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use axum_helpers::errors::responses::{
    ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::CatalogResult;
use crate::models::{CartEntry, CatalogSnapshot, DeleteOutcome, Product};
use crate::repository::CatalogRepository;
use crate::service::CatalogService;

/// OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, delete_product, list_carts, list_all),
    components(
        schemas(Product, CartEntry, CatalogSnapshot, DeleteOutcome),
        responses(NotFoundResponse, ConflictResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Catalog", description = "Products and carts")
    )
)]
pub struct ApiDoc;

/// Query parameters for product deletion
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteParams {
    /// Delete even when a cart references the product. Only the literal `true` forces.
    pub force: Option<String>,
}

impl DeleteParams {
    /// Collect `force` from raw query pairs. Repeated values are joined with
    /// `,`, so `force=true&force=true` does not force.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let values: Vec<&str> = pairs
            .iter()
            .filter(|(key, _)| key == "force")
            .map(|(_, value)| value.as_str())
            .collect();

        Self {
            force: (!values.is_empty()).then(|| values.join(",")),
        }
    }

    pub fn is_forced(&self) -> bool {
        self.force.as_deref() == Some("true")
    }
}

/// Create the catalog router; mount it under `/api`.
pub fn router<R: CatalogRepository + 'static>(service: CatalogService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/productos", get(list_products))
        .route("/productos/{id}", delete(delete_product))
        .route("/carrito", get(list_carts))
        .route("/all", get(list_all))
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "/productos",
    tag = "Catalog",
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
) -> CatalogResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Delete a product, checking carts for references first
#[utoipa::path(
    delete,
    path = "/productos/{id}",
    tag = "Catalog",
    params(
        ("id" = String, Path, description = "Product id, ObjectId hex or string"),
        DeleteParams
    ),
    responses(
        (status = 200, description = "Product deleted", body = DeleteOutcome),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(id): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
) -> CatalogResult<Json<DeleteOutcome>> {
    let params = DeleteParams::from_pairs(&query);
    let outcome = service.delete_product(&id, params.is_forced()).await?;
    Ok(Json(outcome))
}

/// List all cart entries
#[utoipa::path(
    get,
    path = "/carrito",
    tag = "Catalog",
    responses(
        (status = 200, description = "All cart entries", body = Vec<CartEntry>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_carts<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
) -> CatalogResult<Json<Vec<CartEntry>>> {
    let carts = service.list_carts().await?;
    Ok(Json(carts))
}

/// List products and cart entries together
#[utoipa::path(
    get,
    path = "/all",
    tag = "Catalog",
    responses(
        (status = 200, description = "Products and carts", body = CatalogSnapshot),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_all<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
) -> CatalogResult<Json<CatalogSnapshot>> {
    let snapshot = service.list_all().await?;
    Ok(Json(snapshot))
}
