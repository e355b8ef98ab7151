use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use inkpress_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `inkpress_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = status_for(&self);

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map an [`AppError`] to its HTTP status, stable error code, and message.
pub fn status_for(err: &AppError) -> (StatusCode, &'static str, String) {
    match err {
        // --- CoreError variants ---
        AppError::Core(core) => match core {
            CoreError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            CoreError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            CoreError::InvalidState(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_STATE", msg.clone())
            }
            CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            CoreError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            CoreError::TransientStore(msg) => {
                tracing::warn!(error = %msg, "Transient store failure");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "TRANSIENT",
                    "The service is temporarily unavailable, retry shortly".to_string(),
                )
            }
            CoreError::Render(msg) => {
                tracing::error!(error = %msg, "Renderer failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "RENDER_FAILED",
                    "Document rendering failed".to_string(),
                )
            }
            CoreError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal core error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        },

        // --- Database errors ---
        AppError::Database(err) => classify_sqlx_error(err),

        // --- HTTP-specific errors ---
        AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        AppError::InternalError(msg) => {
            tracing::error!(error = %msg, "Internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Pool timeouts and I/O errors map to 503 as transient failures.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
            tracing::warn!(error = %err, "Transient database error");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "TRANSIENT",
                "The service is temporarily unavailable, retry shortly".to_string(),
            )
        }
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_maps_to_400_with_stable_code() {
        let err = AppError::Core(CoreError::invalid_state("submit content", "published"));
        let (status, code, message) = status_for(&err);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "INVALID_STATE");
        assert!(message.contains("published"));
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::Core(CoreError::NotFound {
            entity: "Content",
            id: 42,
        });
        let (status, code, _) = status_for(&err);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
    }

    #[test]
    fn transient_store_maps_to_503() {
        let err = AppError::Core(CoreError::TransientStore("pool timed out".into()));
        let (status, code, _) = status_for(&err);
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(code, "TRANSIENT");
    }

    #[test]
    fn render_failure_maps_to_502() {
        let err = AppError::Core(CoreError::Render("renderer returned 500".into()));
        let (status, code, _) = status_for(&err);
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "RENDER_FAILED");
    }

    #[test]
    fn pool_timeout_maps_to_503() {
        let err = AppError::Database(sqlx::Error::PoolTimedOut);
        let (status, code, _) = status_for(&err);
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(code, "TRANSIENT");
    }

    #[test]
    fn forbidden_maps_to_403() {
        let err = AppError::Core(CoreError::Forbidden("not the author".into()));
        let (status, code, _) = status_for(&err);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(code, "FORBIDDEN");
    }
}
