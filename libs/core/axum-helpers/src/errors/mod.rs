pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Standard error response structure.
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 2003,
///   "error": "DATABASE_ERROR",
///   "message": "Error al obtener productos",
///   "details": "server selection timeout"
/// }
/// ```
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier, or the headline of a marked conflict
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional diagnostic payload (e.g. the raw driver message)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    /// 409 whose body carries `"<marker>": true` next to the standard fields.
    /// `error` replaces the machine identifier with a caller-supplied headline.
    #[error("Conflict: {error}: {message}")]
    ConflictWithMarker {
        error: String,
        message: String,
        marker: &'static str,
    },

    /// Document-store failure; `details` is passed through verbatim.
    #[error("Store failure: {message}: {details}")]
    StoreFailure { message: String, details: String },

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details, marker) = match self {
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg, None, None)
            }
            AppError::ConflictWithMarker {
                error,
                message,
                marker,
            } => {
                tracing::info!(
                    error_code = ErrorCode::ResourceLinked.code(),
                    marker,
                    "Conflict: {}: {}",
                    error,
                    message
                );
                (
                    StatusCode::CONFLICT,
                    ErrorCode::ResourceLinked,
                    message,
                    None,
                    Some((error, marker)),
                )
            }
            AppError::StoreFailure { message, details } => {
                tracing::error!(
                    error_code = ErrorCode::DatabaseError.code(),
                    details = %details,
                    "Store failure: {}",
                    message
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DatabaseError,
                    message,
                    Some(serde_json::Value::String(details)),
                    None,
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError,
                    msg,
                    None,
                    None,
                )
            }
        };

        let body = ErrorResponse {
            details,
            ..ErrorResponse::new(code, message)
        };

        match marker {
            None => (status, Json(body)).into_response(),
            Some((headline, marker)) => {
                let body = ErrorResponse {
                    error: headline,
                    ..body
                };
                let mut value = serde_json::to_value(&body).unwrap_or_default();
                if let serde_json::Value::Object(ref mut map) = value {
                    map.insert(marker.to_string(), serde_json::Value::Bool(true));
                }
                (status, Json(value)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let response = AppError::NotFound("Producto no encontrado".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["message"], "Producto no encontrado");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_store_failure_passes_details_through() {
        let response = AppError::StoreFailure {
            message: "Error al obtener carrito".into(),
            details: "connection reset by peer".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], 2003);
        assert_eq!(body["message"], "Error al obtener carrito");
        assert_eq!(body["details"], "connection reset by peer");
    }

    #[tokio::test]
    async fn test_conflict_with_marker_adds_flag() {
        let response = AppError::ConflictWithMarker {
            error: "Producto vinculado a compras".into(),
            message: "Confirma el borrado definitivo.".into(),
            marker: "linked",
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["linked"], true);
        assert_eq!(body["code"], 1012);
        assert_eq!(body["error"], "Producto vinculado a compras");
        assert_eq!(body["message"], "Confirma el borrado definitivo.");
    }

    #[tokio::test]
    async fn test_internal_error_has_no_marker_or_details() {
        let response = AppError::InternalServerError("No se pudo eliminar".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "INTERNAL_ERROR");
        assert!(body.get("linked").is_none());
        assert!(body.get("details").is_none());
    }
}
