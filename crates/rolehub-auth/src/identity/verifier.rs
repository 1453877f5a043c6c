//! Resolves a bearer token to an active internal account.

use std::sync::Arc;

use tracing::debug;

use rolehub_core::error::AppError;
use rolehub_core::result::AppResult;
use rolehub_store::{AccountStore, IdentityProvider, RoleAssignmentStore};

use super::bearer::extract_bearer;
use crate::context::AuthContext;

const MISSING_TOKEN: &str = "No autorizado: falta Bearer token.";
const INVALID_TOKEN: &str = "No autorizado: token inválido o expirado.";
const NOT_REGISTERED: &str = "Acceso denegado: usuario no registrado en el sistema.";
const INACTIVE: &str = "Acceso denegado: usuario inactivo.";

/// Verifies bearer tokens with the identity provider on every call.
#[derive(Debug, Clone)]
pub struct IdentityVerifier {
    identity: Arc<dyn IdentityProvider>,
    accounts: Arc<dyn AccountStore>,
    assignments: Arc<dyn RoleAssignmentStore>,
}

impl IdentityVerifier {
    /// Create a new verifier.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        accounts: Arc<dyn AccountStore>,
        assignments: Arc<dyn RoleAssignmentStore>,
    ) -> Self {
        Self {
            identity,
            accounts,
            assignments,
        }
    }

    /// Verify the raw `Authorization` header value.
    ///
    /// Fails with `Unauthenticated` when the header is missing, malformed or
    /// rejected by the provider, and with `Forbidden` when the subject has no
    /// account or the account is inactive.
    pub async fn verify(&self, authorization: Option<&str>) -> AppResult<AuthContext> {
        let token = authorization
            .and_then(extract_bearer)
            .ok_or_else(|| AppError::unauthenticated(MISSING_TOKEN))?;

        let Some(user) = self.identity.verify_token(token).await? else {
            return Err(AppError::unauthenticated(INVALID_TOKEN));
        };

        let account = self
            .accounts
            .find_by_auth_user(user.id)
            .await?
            .ok_or_else(|| {
                debug!(auth_user_id = %user.id, "Token subject has no account");
                AppError::forbidden(NOT_REGISTERED)
            })?;

        if !account.active {
            debug!(user_id = %account.id, "Inactive account rejected");
            return Err(AppError::forbidden(INACTIVE));
        }

        let rol_id = self
            .assignments
            .find_by_account(account.id)
            .await?
            .map(|a| a.role_id);

        Ok(AuthContext {
            token: token.to_string(),
            auth_user_id: user.id,
            user_id: account.id,
            email: user.email.or(Some(account.email)),
            rol_id,
        })
    }
}
