//! Account to role assignment handlers.

use axum::Json;
use axum::extract::{Path, State};

use rolehub_core::error::AppError;
use rolehub_core::types::AccountId;
use rolehub_entity::RoleAssignment;

use crate::dto::{AssignRoleRequest, OkResponse, RoleIdResponse};
use crate::error::ApiError;
use crate::extractors::{ApiJson, parse_id};
use crate::state::AppState;

/// POST /api/usuario-rol/assign
pub async fn assign(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AssignRoleRequest>,
) -> Result<Json<RoleAssignment>, ApiError> {
    let (account_id, role_id) = req.ids()?;
    Ok(Json(state.assignments.assign(account_id, role_id).await?))
}

/// GET /api/usuario-rol/usuario/{usuario_id}
pub async fn get_by_user(
    State(state): State<AppState>,
    Path(usuario_id): Path<String>,
) -> Result<Json<RoleAssignment>, ApiError> {
    let usuario_id: AccountId = parse_id(&usuario_id)?;
    Ok(Json(state.assignments.get_by_account(usuario_id).await?))
}

/// GET /api/usuario-rol/usuario/{usuario_id}/rol
pub async fn get_role_id(
    State(state): State<AppState>,
    Path(usuario_id): Path<String>,
) -> Result<Json<RoleIdResponse>, ApiError> {
    let usuario_id: AccountId = parse_id(&usuario_id)?;
    let rol_id = state
        .assignments
        .role_id_of(usuario_id)
        .await?
        .ok_or_else(|| AppError::not_found("El usuario no tiene rol asignado."))?;
    Ok(Json(RoleIdResponse { rol_id }))
}

/// DELETE /api/usuario-rol/usuario/{usuario_id}
pub async fn remove(
    State(state): State<AppState>,
    Path(usuario_id): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    let usuario_id: AccountId = parse_id(&usuario_id)?;
    state.assignments.remove(usuario_id).await?;
    Ok(Json(OkResponse::ok()))
}
