//! Permission table access.

use async_trait::async_trait;

use rolehub_core::result::AppResult;
use rolehub_core::types::RoleId;
use rolehub_entity::{Module, Permission, PermissionGrant};

/// Access to the `permisos` table, keyed on `(rol_id, modulo)`.
#[async_trait]
pub trait PermissionStore: Send + Sync + std::fmt::Debug + 'static {
    /// All permissions of a role.
    async fn list_by_role(&self, role_id: RoleId) -> AppResult<Vec<Permission>>;

    /// The permission of a role on one module.
    async fn find(&self, role_id: RoleId, module: Module) -> AppResult<Option<Permission>>;

    /// Insert or overwrite the given grants, returning the stored rows.
    async fn upsert_many(&self, grants: &[PermissionGrant]) -> AppResult<Vec<Permission>>;

    /// Delete the permission of a role on one module, if present.
    async fn delete(&self, role_id: RoleId, module: Module) -> AppResult<()>;
}
