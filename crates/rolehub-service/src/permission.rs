//! Permission maintenance exposed to the HTTP layer.

use std::collections::BTreeMap;

use rolehub_auth::PermissionResolver;
use rolehub_core::error::AppError;
use rolehub_core::result::AppResult;
use rolehub_core::types::RoleId;
use rolehub_entity::{Module, Permission, PermissionFlags, PermissionGrant};

/// Thin wrapper over [`PermissionResolver`] adding the not-found mapping.
#[derive(Debug, Clone)]
pub struct PermissionService {
    resolver: PermissionResolver,
}

impl PermissionService {
    pub fn new(resolver: PermissionResolver) -> Self {
        Self { resolver }
    }

    /// Every permission of a role, sorted by module.
    pub async fn list_by_role(&self, role_id: RoleId) -> AppResult<Vec<Permission>> {
        self.resolver.resolve_all(role_id).await
    }

    pub async fn get(&self, role_id: RoleId, module: Module) -> AppResult<Permission> {
        self.resolver
            .resolve(role_id, module)
            .await?
            .ok_or_else(|| AppError::not_found("Permiso no encontrado."))
    }

    pub async fn upsert(&self, grant: PermissionGrant) -> AppResult<Permission> {
        self.resolver.upsert(grant).await
    }

    pub async fn upsert_many(&self, grants: &[PermissionGrant]) -> AppResult<Vec<Permission>> {
        self.resolver.upsert_many(grants).await
    }

    pub async fn set_many_for_role(
        &self,
        role_id: RoleId,
        by_module: &BTreeMap<Module, PermissionFlags>,
    ) -> AppResult<Vec<Permission>> {
        self.resolver.set_many_for_role(role_id, by_module).await
    }

    pub async fn remove(&self, role_id: RoleId, module: Module) -> AppResult<()> {
        self.resolver.remove(role_id, module).await
    }
}
