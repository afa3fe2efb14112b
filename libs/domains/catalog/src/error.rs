use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

pub const LIST_PRODUCTS_FAILED: &str = "Error al obtener productos";
pub const LIST_CARTS_FAILED: &str = "Error al obtener carrito";
pub const LIST_ALL_FAILED: &str = "Error al obtener datos";
pub const DELETE_PRODUCT_FAILED: &str = "Error al eliminar producto";
pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";
pub const PRODUCT_NOT_DELETED: &str = "No se pudo eliminar el producto";
pub const PRODUCT_LINKED: &str = "Producto vinculado a compras";
pub const PRODUCT_LINKED_DETAIL: &str =
    "El producto está asociado a al menos un carrito. Confirma el borrado definitivo.";

/// Body key flagging a delete that was refused because of cart references.
pub const LINKED_MARKER: &str = "linked";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    NotFound(String),

    /// The product is referenced by at least one cart and the delete was not forced.
    #[error("{}: {}", PRODUCT_LINKED, PRODUCT_LINKED_DETAIL)]
    Linked,

    /// A store failure tagged with the operation it interrupted.
    #[error("{context}: {details}")]
    Store {
        context: &'static str,
        details: String,
    },

    /// Raw driver failure, not yet tagged with an operation.
    #[error("Database error: {0}")]
    Database(String),

    /// The product matched but the delete removed nothing.
    #[error("{0}")]
    DeleteFailed(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Tag an untagged driver failure with `context`; other variants pass through.
    pub fn in_context(self, context: &'static str) -> Self {
        match self {
            CatalogError::Database(details) => CatalogError::Store { context, details },
            other => other,
        }
    }
}

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(msg) => AppError::NotFound(msg),
            CatalogError::Linked => AppError::ConflictWithMarker {
                error: PRODUCT_LINKED.to_string(),
                message: PRODUCT_LINKED_DETAIL.to_string(),
                marker: LINKED_MARKER,
            },
            CatalogError::Store { context, details } => AppError::StoreFailure {
                message: context.to_string(),
                details,
            },
            CatalogError::Database(details) => AppError::StoreFailure {
                message: "Database error".to_string(),
                details,
            },
            CatalogError::DeleteFailed(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CatalogError {
    fn from(err: mongodb::error::Error) -> Self {
        CatalogError::Database(err.to_string())
    }
}
