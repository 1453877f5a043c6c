//! Role management.

use std::sync::Arc;

use tracing::info;

use rolehub_core::error::{AppError, ErrorKind};
use rolehub_core::result::AppResult;
use rolehub_core::types::{Page, RoleId};
use rolehub_entity::account::normalize_optional;
use rolehub_entity::{NewRole, Role, RoleName, RolePatch};
use rolehub_store::{ListFilter, RoleAssignmentStore, RoleStore};

const NOT_FOUND: &str = "Rol no encontrado.";
const EMPTY_PATCH: &str = "No hay campos para actualizar.";
const IN_USE: &str = "No puedes eliminar este rol porque está asignado a usuarios.";

/// Input for role creation. The name is validated here.
#[derive(Debug, Clone)]
pub struct CreateRoleInput {
    pub name: String,
    pub description: Option<String>,
}

/// Partial role update.
#[derive(Debug, Clone, Default)]
pub struct UpdateRoleInput {
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub active: Option<bool>,
}

/// Role CRUD with the name-uniqueness and in-use guards.
#[derive(Debug, Clone)]
pub struct RoleService {
    roles: Arc<dyn RoleStore>,
    assignments: Arc<dyn RoleAssignmentStore>,
}

impl RoleService {
    /// Create a new role service.
    pub fn new(roles: Arc<dyn RoleStore>, assignments: Arc<dyn RoleAssignmentStore>) -> Self {
        Self { roles, assignments }
    }

    /// List roles.
    pub async fn list(&self, filter: &ListFilter) -> AppResult<Page<Role>> {
        self.roles.list(filter).await
    }

    /// Get one role.
    pub async fn get(&self, id: RoleId) -> AppResult<Role> {
        self.roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))
    }

    /// Create an active role with a unique name.
    pub async fn create(&self, input: CreateRoleInput) -> AppResult<Role> {
        let name: RoleName = input.name.parse()?;
        if self.roles.find_by_name(name).await?.is_some() {
            return Err(duplicate(name));
        }

        let role = self
            .roles
            .insert(&NewRole {
                name,
                description: normalize_optional(input.description.as_deref()),
                active: true,
            })
            .await
            .map_err(|e| on_conflict(e, || duplicate(name)))?;

        info!(rol_id = %role.id, nombre = %role.name, "Role created");
        Ok(role)
    }

    /// Apply a partial update. A new name must not belong to another role.
    pub async fn update(&self, id: RoleId, input: UpdateRoleInput) -> AppResult<Role> {
        let name = input
            .name
            .as_deref()
            .map(str::parse::<RoleName>)
            .transpose()?;

        let patch = RolePatch {
            name,
            description: input
                .description
                .map(|d| normalize_optional(d.as_deref())),
            active: input.active,
        };
        if patch.is_empty() {
            return Err(AppError::validation(EMPTY_PATCH));
        }

        if let Some(name) = name {
            if let Some(other) = self.roles.find_by_name(name).await? {
                if other.id != id {
                    return Err(duplicate_other(name));
                }
            }
        }

        let role = self
            .roles
            .update(id, &patch)
            .await
            .map_err(|e| match name {
                Some(name) => on_conflict(e, || duplicate_other(name)),
                None => e,
            })?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

        info!(rol_id = %id, "Role updated");
        Ok(role)
    }

    /// Activate or deactivate a role.
    pub async fn set_active(&self, id: RoleId, active: bool) -> AppResult<Role> {
        let role = self
            .roles
            .update(id, &RolePatch::active(active))
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
        info!(rol_id = %id, estado = active, "Role status changed");
        Ok(role)
    }

    /// Delete a role that no account holds.
    pub async fn delete(&self, id: RoleId) -> AppResult<()> {
        let holders = self.assignments.count_by_role(id).await?;
        if holders > 0 {
            return Err(AppError::conflict(IN_USE));
        }
        if !self.roles.delete(id).await? {
            return Err(AppError::not_found(NOT_FOUND));
        }
        info!(rol_id = %id, "Role deleted");
        Ok(())
    }
}

fn duplicate(name: RoleName) -> AppError {
    AppError::conflict(format!("Ya existe un rol con nombre {name}"))
}

fn duplicate_other(name: RoleName) -> AppError {
    AppError::conflict(format!("Ya existe otro rol con nombre {name}"))
}

fn on_conflict(err: AppError, replacement: impl FnOnce() -> AppError) -> AppError {
    if err.is(ErrorKind::Conflict) {
        replacement()
    } else {
        err
    }
}
