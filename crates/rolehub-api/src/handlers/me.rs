//! The caller's own profile.

use axum::extract::State;
use axum::{Extension, Json};

use rolehub_auth::AuthContext;
use rolehub_service::Profile;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.profile.me(&ctx).await?))
}
