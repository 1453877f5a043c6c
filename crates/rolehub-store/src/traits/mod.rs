//! Storage and identity traits implemented by every backend.

pub mod account;
pub mod assignment;
pub mod identity;
pub mod permission;
pub mod role;

pub use account::AccountStore;
pub use assignment::RoleAssignmentStore;
pub use identity::{IdentityProvider, IdentityUser};
pub use permission::PermissionStore;
pub use role::RoleStore;

use rolehub_core::types::PageRequest;

/// Filters shared by the paginated list queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Requested page.
    pub page: PageRequest,
    /// Case-insensitive substring search; blank means no search.
    pub search: Option<String>,
    /// Restrict to active or inactive rows.
    pub active: Option<bool>,
}

impl ListFilter {
    /// The trimmed search term, if it is not blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
