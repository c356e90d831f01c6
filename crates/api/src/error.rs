//! Error rendering for HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use barrkeh_core::FinanceError;
use barrkeh_store::StoreError;
use serde_json::json;
use tracing::error;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// A failed request.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl ApiError {
    /// Shorthand for a missing entity.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self(StoreError::Finance(FinanceError::not_found(entity, id)))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl From<FinanceError> for ApiError {
    fn from(err: FinanceError) -> Self {
        Self(StoreError::Finance(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, retryable = self.0.is_retryable(), "Request failed");
        }
        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
