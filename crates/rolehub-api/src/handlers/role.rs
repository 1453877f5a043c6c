//! Role management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use rolehub_core::types::{Page, RoleId};
use rolehub_entity::Role;

use crate::dto::{CreateRoleRequest, EstadoRequest, OkResponse, UpdateRoleRequest};
use crate::error::ApiError;
use crate::extractors::{ApiJson, ListQuery, ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /api/roles
pub async fn list_roles(
    State(state): State<AppState>,
    ListQuery(filter): ListQuery,
) -> Result<Json<Page<Role>>, ApiError> {
    Ok(Json(state.roles.list(&filter).await?))
}

/// GET /api/roles/{id}
pub async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Role>, ApiError> {
    let id: RoleId = parse_id(&id)?;
    Ok(Json(state.roles.get(id).await?))
}

/// POST /api/roles
pub async fn create_role(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateRoleRequest>,
) -> Result<(StatusCode, Json<Role>), ApiError> {
    let role = state.roles.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// PUT /api/roles/{id}
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateRoleRequest>,
) -> Result<Json<Role>, ApiError> {
    let id: RoleId = parse_id(&id)?;
    let input = req.into_input()?;
    Ok(Json(state.roles.update(id, input).await?))
}

/// PATCH /api/roles/{id}/estado
pub async fn set_role_estado(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<EstadoRequest>,
) -> Result<Json<Role>, ApiError> {
    let id: RoleId = parse_id(&id)?;
    let active = req.value()?;
    Ok(Json(state.roles.set_active(id, active).await?))
}

/// DELETE /api/roles/{id}
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    let id: RoleId = parse_id(&id)?;
    state.roles.delete(id).await?;
    Ok(Json(OkResponse::ok()))
}
