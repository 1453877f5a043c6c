//! Account to role assignment. Each account holds at most one role.

use std::sync::Arc;

use tracing::info;

use rolehub_core::error::AppError;
use rolehub_core::result::AppResult;
use rolehub_core::types::{AccountId, RoleId};
use rolehub_entity::RoleAssignment;
use rolehub_store::{AccountStore, RoleAssignmentStore, RoleStore};

#[derive(Debug, Clone)]
pub struct AssignmentService {
    accounts: Arc<dyn AccountStore>,
    roles: Arc<dyn RoleStore>,
    assignments: Arc<dyn RoleAssignmentStore>,
}

impl AssignmentService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        roles: Arc<dyn RoleStore>,
        assignments: Arc<dyn RoleAssignmentStore>,
    ) -> Self {
        Self {
            accounts,
            roles,
            assignments,
        }
    }

    /// Assign a role, replacing any previous one.
    ///
    /// Both sides must exist and be active.
    pub async fn assign(&self, account_id: AccountId, role_id: RoleId) -> AppResult<RoleAssignment> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::not_found("Usuario no encontrado."))?;
        if !account.account.active {
            return Err(AppError::conflict(
                "No se puede asignar rol a un usuario inactivo.",
            ));
        }

        let role = self
            .roles
            .find_by_id(role_id)
            .await?
            .ok_or_else(|| AppError::not_found("Rol no encontrado."))?;
        if !role.active {
            return Err(AppError::conflict("No se puede asignar un rol inactivo."));
        }

        let assignment = self.assignments.upsert(account_id, role_id).await?;
        info!(usuario_id = %account_id, rol_id = %role_id, "Role assigned");
        Ok(assignment)
    }

    pub async fn get_by_account(&self, account_id: AccountId) -> AppResult<RoleAssignment> {
        self.assignments
            .find_by_account(account_id)
            .await?
            .ok_or_else(|| AppError::not_found("El usuario no tiene rol asignado."))
    }

    /// The role id held by an account, if any.
    pub async fn role_id_of(&self, account_id: AccountId) -> AppResult<Option<RoleId>> {
        Ok(self
            .assignments
            .find_by_account(account_id)
            .await?
            .map(|a| a.role_id))
    }

    /// Drop the account's assignment. Absence is not an error.
    pub async fn remove(&self, account_id: AccountId) -> AppResult<()> {
        self.assignments.delete_by_account(account_id).await?;
        info!(usuario_id = %account_id, "Role assignment removed");
        Ok(())
    }
}
