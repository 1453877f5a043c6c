//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use rolehub_core::error::{AppError, ErrorKind};

/// Fallback for a 500 that carries no message of its own.
pub const INTERNAL_MESSAGE: &str = "Error interno del servidor.";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    pub message: String,
}

impl ApiErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `AppError` carried to the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.kind.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if matches!(
            err.kind,
            ErrorKind::Upstream | ErrorKind::Configuration | ErrorKind::Internal
        ) {
            tracing::error!(
                kind = %err.kind,
                error = %err.message,
                source = ?err.source,
                "Request failed"
            );
        }

        let message = if err.message.trim().is_empty() {
            INTERNAL_MESSAGE.to_string()
        } else {
            err.message
        };

        (status, Json(ApiErrorResponse { message })).into_response()
    }
}
