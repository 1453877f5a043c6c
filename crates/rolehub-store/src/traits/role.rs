//! Role table access.

use async_trait::async_trait;

use rolehub_core::result::AppResult;
use rolehub_core::types::{Page, RoleId};
use rolehub_entity::{NewRole, Role, RoleName, RolePatch};

use super::ListFilter;

/// Access to the `roles` table.
#[async_trait]
pub trait RoleStore: Send + Sync + std::fmt::Debug + 'static {
    /// List roles newest first; the search term matches the name.
    async fn list(&self, filter: &ListFilter) -> AppResult<Page<Role>>;

    /// Find a role by primary key.
    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>>;

    /// Find a role by name.
    async fn find_by_name(&self, name: RoleName) -> AppResult<Option<Role>>;

    /// Insert a new role. A duplicate name is a `Conflict`.
    async fn insert(&self, role: &NewRole) -> AppResult<Role>;

    /// Apply a patch. Returns `None` when no row has that id.
    async fn update(&self, id: RoleId, patch: &RolePatch) -> AppResult<Option<Role>>;

    /// Delete a role row. Returns whether a row was removed.
    async fn delete(&self, id: RoleId) -> AppResult<bool>;
}
