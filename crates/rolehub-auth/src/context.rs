//! The authenticated caller.

use serde::Serialize;

use rolehub_core::types::{AccountId, AuthUserId, RoleId};

/// Identity attached to a request once its bearer token has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthContext {
    /// The bearer token as presented.
    #[serde(skip_serializing)]
    pub token: String,
    /// Provider subject id.
    pub auth_user_id: AuthUserId,
    /// Internal account id.
    pub user_id: AccountId,
    /// Provider email, falling back to the account's.
    pub email: Option<String>,
    /// Assigned role, if any.
    pub rol_id: Option<RoleId>,
}
