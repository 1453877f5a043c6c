//! Permission management handlers.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use serde_json::Value;

use rolehub_core::types::RoleId;
use rolehub_entity::{Permission, PermissionFlags};

use crate::dto::{DataResponse, OkResponse, PermisoUpsertRequest};
use crate::error::ApiError;
use crate::extractors::{ApiJson, parse_id, parse_module};
use crate::state::AppState;

/// GET /api/permisos/rol/{rol_id}
pub async fn list_by_role(
    State(state): State<AppState>,
    Path(rol_id): Path<String>,
) -> Result<Json<DataResponse<Vec<Permission>>>, ApiError> {
    let rol_id: RoleId = parse_id(&rol_id)?;
    let data = state.permissions.list_by_role(rol_id).await?;
    Ok(Json(DataResponse::new(data)))
}

/// GET /api/permisos/rol/{rol_id}/modulo/{modulo}
pub async fn get_permission(
    State(state): State<AppState>,
    Path((rol_id, modulo)): Path<(String, String)>,
) -> Result<Json<Permission>, ApiError> {
    let module = parse_module(&modulo)?;
    let rol_id: RoleId = parse_id(&rol_id)?;
    Ok(Json(state.permissions.get(rol_id, module).await?))
}

/// PUT /api/permisos/rol/{rol_id}
pub async fn set_for_role(
    State(state): State<AppState>,
    Path(rol_id): Path<String>,
    ApiJson(body): ApiJson<BTreeMap<String, PermissionFlags>>,
) -> Result<Json<DataResponse<Vec<Permission>>>, ApiError> {
    let rol_id: RoleId = parse_id(&rol_id)?;
    let by_module = PermisoUpsertRequest::by_module(body)?;
    let data = state.permissions.set_many_for_role(rol_id, &by_module).await?;
    Ok(Json(DataResponse::new(data)))
}

/// POST /api/permisos/upsert
pub async fn upsert(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<PermisoUpsertRequest>,
) -> Result<Json<Permission>, ApiError> {
    let grant = req.into_grant()?;
    Ok(Json(state.permissions.upsert(grant).await?))
}

/// POST /api/permisos/upsert-many
pub async fn upsert_many(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> Result<Json<DataResponse<Vec<Permission>>>, ApiError> {
    let grants = PermisoUpsertRequest::batch(body)?;
    let data = state.permissions.upsert_many(&grants).await?;
    Ok(Json(DataResponse::new(data)))
}

/// DELETE /api/permisos/rol/{rol_id}/modulo/{modulo}
pub async fn remove(
    State(state): State<AppState>,
    Path((rol_id, modulo)): Path<(String, String)>,
) -> Result<Json<OkResponse>, ApiError> {
    let module = parse_module(&modulo)?;
    let rol_id: RoleId = parse_id(&rol_id)?;
    state.permissions.remove(rol_id, module).await?;
    Ok(Json(OkResponse::ok()))
}
