//! Role assignment table access.

use async_trait::async_trait;

use rolehub_core::result::AppResult;
use rolehub_core::types::{AccountId, RoleId};
use rolehub_entity::RoleAssignment;

/// Access to the `usuario_rol` table, keyed on `usuario_id`.
#[async_trait]
pub trait RoleAssignmentStore: Send + Sync + std::fmt::Debug + 'static {
    /// The assignment of an account, if any.
    async fn find_by_account(&self, account_id: AccountId) -> AppResult<Option<RoleAssignment>>;

    /// Assign a role, replacing any previous assignment of the account.
    async fn upsert(&self, account_id: AccountId, role_id: RoleId) -> AppResult<RoleAssignment>;

    /// Remove the assignment of an account, if present.
    async fn delete_by_account(&self, account_id: AccountId) -> AppResult<()>;

    /// Number of accounts holding a role.
    async fn count_by_role(&self, role_id: RoleId) -> AppResult<u64>;
}
