//! The caller's own profile: account, role and permissions.

use std::sync::Arc;

use serde::Serialize;

use rolehub_auth::{AuthContext, PermissionResolver};
use rolehub_core::error::AppError;
use rolehub_core::result::AppResult;
use rolehub_entity::{Account, Permission, Role};
use rolehub_store::{AccountStore, RoleStore};

/// Response body of the profile endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub user: Account,
    pub rol: Option<Role>,
    pub permisos: Vec<Permission>,
}

#[derive(Debug, Clone)]
pub struct ProfileService {
    accounts: Arc<dyn AccountStore>,
    roles: Arc<dyn RoleStore>,
    resolver: PermissionResolver,
}

impl ProfileService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        roles: Arc<dyn RoleStore>,
        resolver: PermissionResolver,
    ) -> Self {
        Self {
            accounts,
            roles,
            resolver,
        }
    }

    /// Build the profile of an authenticated caller.
    ///
    /// Without a role (or with a dangling role id) `rol` is `None` and no
    /// permissions are listed.
    pub async fn me(&self, ctx: &AuthContext) -> AppResult<Profile> {
        let user = self
            .accounts
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Usuario no encontrado."))?
            .account;
        if !user.active {
            return Err(AppError::forbidden("Usuario inactivo."));
        }

        let rol = match ctx.rol_id {
            Some(role_id) => self.roles.find_by_id(role_id).await?,
            None => None,
        };
        let permisos = match &rol {
            Some(role) => self.resolver.resolve_all(role.id).await?,
            None => Vec::new(),
        };

        Ok(Profile {
            user,
            rol,
            permisos,
        })
    }
}
