//! Per-request module authorization.

use http::Method;
use tracing::debug;

use rolehub_core::error::AppError;
use rolehub_core::result::AppResult;
use rolehub_entity::{Module, Permission};

use super::resolver::PermissionResolver;
use super::verb::access_for_method;
use crate::context::AuthContext;

/// Decides whether an authenticated caller may use a verb on a module.
///
/// The decision depends only on the stored permission row and the verb
/// mapping. No row means deny.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    resolver: PermissionResolver,
}

impl AuthorizationGate {
    /// Create a new gate.
    pub fn new(resolver: PermissionResolver) -> Self {
        Self { resolver }
    }

    /// Authorize a request, returning the permission that allowed it.
    pub async fn authorize(
        &self,
        ctx: Option<&AuthContext>,
        module: Module,
        method: &Method,
    ) -> AppResult<Permission> {
        let ctx =
            ctx.ok_or_else(|| AppError::unauthenticated("No autorizado: falta autenticación."))?;

        let role_id = ctx
            .rol_id
            .ok_or_else(|| AppError::forbidden("Acceso denegado: usuario sin rol asignado."))?;

        let permission = self
            .resolver
            .resolve(role_id, module)
            .await?
            .ok_or_else(|| {
                AppError::forbidden(format!(
                    "Acceso denegado: el rol no tiene permisos definidos para el módulo {module}."
                ))
            })?;

        let allowed = access_for_method(method).is_some_and(|access| permission.allows(access));
        if !allowed {
            debug!(
                user_id = %ctx.user_id,
                rol_id = %role_id,
                modulo = %module,
                method = %method,
                "Request denied"
            );
            return Err(AppError::forbidden(format!(
                "Acceso denegado: no tienes permiso para {method} en {module}."
            )));
        }

        Ok(permission)
    }
}
