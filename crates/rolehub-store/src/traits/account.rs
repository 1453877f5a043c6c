//! Account table access.

use async_trait::async_trait;

use rolehub_core::result::AppResult;
use rolehub_core::types::{AccountId, AuthUserId, Page};
use rolehub_entity::{Account, AccountPatch, AccountWithRole, NewAccount};

use super::ListFilter;

/// Access to the `usuarios` table.
#[async_trait]
pub trait AccountStore: Send + Sync + std::fmt::Debug + 'static {
    /// List accounts joined with their role, newest first.
    ///
    /// The search term matches name, surname or email.
    async fn list(&self, filter: &ListFilter) -> AppResult<Page<AccountWithRole>>;

    /// Find an account with its role by primary key.
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<AccountWithRole>>;

    /// Find the account linked to an identity provider subject.
    async fn find_by_auth_user(&self, subject: AuthUserId) -> AppResult<Option<Account>>;

    /// Find an account by its normalized email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Insert a new account. A duplicate email is a `Conflict`.
    async fn insert(&self, account: &NewAccount) -> AppResult<Account>;

    /// Apply a patch. Returns `None` when no row has that id.
    async fn update(&self, id: AccountId, patch: &AccountPatch) -> AppResult<Option<Account>>;

    /// Delete an account row. Returns whether a row was removed.
    async fn delete(&self, id: AccountId) -> AppResult<bool>;
}
