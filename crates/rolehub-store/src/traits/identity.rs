//! External identity provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use rolehub_core::result::AppResult;
use rolehub_core::types::AuthUserId;

/// A user record held by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUser {
    /// Provider subject id.
    pub id: AuthUserId,
    /// Email known to the provider.
    pub email: Option<String>,
}

/// Session validation and administrative user management.
///
/// Tokens are issued by the provider; this service only validates them.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Validate a bearer token. `Ok(None)` means the provider rejected it.
    async fn verify_token(&self, token: &str) -> AppResult<Option<IdentityUser>>;

    /// Create a pre-confirmed identity with email and password.
    async fn create_user(&self, email: &str, password: &str) -> AppResult<IdentityUser>;

    /// Change the email of an identity.
    async fn update_email(&self, id: AuthUserId, email: &str) -> AppResult<()>;

    /// Delete an identity. Deleting an unknown id succeeds.
    async fn delete_user(&self, id: AuthUserId) -> AppResult<()>;
}
