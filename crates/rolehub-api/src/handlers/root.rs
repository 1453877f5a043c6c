//! Liveness banner and the unmatched-route fallback.

use axum::Json;
use axum::http::StatusCode;

use crate::error::ApiErrorResponse;

/// GET /
pub async fn banner() -> &'static str {
    "Microservicio de usuarios activo y corriendo"
}

/// Any unmatched route.
pub async fn not_found() -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse::new("Ruta no encontrada.")),
    )
}
