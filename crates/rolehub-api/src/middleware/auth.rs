//! Bearer authentication middleware.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Verifies the bearer token and attaches the caller's
/// [`AuthContext`](rolehub_auth::AuthContext) to the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let ctx = state.verifier.verify(header.as_deref()).await?;
    tracing::debug!(user_id = %ctx.user_id, path = %req.uri().path(), "Authenticated request");

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}
