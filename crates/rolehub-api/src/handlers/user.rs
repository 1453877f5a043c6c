//! Account management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use rolehub_core::types::{AccountId, Page};
use rolehub_entity::{Account, AccountWithRole};

use crate::dto::{CreateUserRequest, EstadoRequest, OkResponse, UpdateUserRequest};
use crate::error::ApiError;
use crate::extractors::{ApiJson, ListQuery, ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    ListQuery(filter): ListQuery,
) -> Result<Json<Page<AccountWithRole>>, ApiError> {
    Ok(Json(state.accounts.list(&filter).await?))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccountWithRole>, ApiError> {
    let id: AccountId = parse_id(&id)?;
    Ok(Json(state.accounts.get(id).await?))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<Account>), ApiError> {
    let account = state.accounts.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<Account>, ApiError> {
    let id: AccountId = parse_id(&id)?;
    let input = req.into_input()?;
    Ok(Json(state.accounts.update(id, input).await?))
}

/// PATCH /api/users/{id}/estado
pub async fn set_user_estado(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<EstadoRequest>,
) -> Result<Json<Account>, ApiError> {
    let id: AccountId = parse_id(&id)?;
    let active = req.value()?;
    Ok(Json(state.accounts.set_active(id, active).await?))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    let id: AccountId = parse_id(&id)?;
    state.accounts.delete(id).await?;
    Ok(Json(OkResponse::ok()))
}
