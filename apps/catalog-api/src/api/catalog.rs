//! Catalog API routes

use axum::Router;
use domain_catalog::{handlers, CatalogService, MongoCatalogRepository};

use crate::state::AppState;

/// Create the catalog router over the shared database handle
pub fn router(state: &AppState) -> Router {
    let repository = MongoCatalogRepository::new(&state.db);
    let service = CatalogService::new(repository);
    handlers::router(service)
}
