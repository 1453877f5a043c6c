//! In-memory identity provider with opaque bearer tokens.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use rolehub_core::error::AppError;
use rolehub_core::result::AppResult;
use rolehub_core::types::AuthUserId;

use crate::traits::{IdentityProvider, IdentityUser};

#[derive(Debug)]
struct StoredIdentity {
    email: String,
    password: String,
}

#[derive(Debug, Default)]
struct InnerState {
    users: HashMap<AuthUserId, StoredIdentity>,
    tokens: HashMap<String, AuthUserId>,
}

/// Identity provider held in process. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityProvider {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryIdentityProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh session token for an existing identity.
    pub async fn issue_token(&self, id: AuthUserId) -> AppResult<String> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&id) {
            return Err(AppError::not_found(format!("Unknown identity {id}")));
        }
        let token = Uuid::new_v4().simple().to_string();
        state.tokens.insert(token.clone(), id);
        Ok(token)
    }

    /// Invalidate a token, as an expired session would be.
    pub async fn revoke_token(&self, token: &str) {
        self.state.lock().await.tokens.remove(token);
    }

    /// Look up an identity.
    pub async fn user(&self, id: AuthUserId) -> Option<IdentityUser> {
        let state = self.state.lock().await;
        state.users.get(&id).map(|u| IdentityUser {
            id,
            email: Some(u.email.clone()),
        })
    }

    /// Check a password against the stored one.
    pub async fn check_password(&self, id: AuthUserId, password: &str) -> bool {
        let state = self.state.lock().await;
        state.users.get(&id).is_some_and(|u| u.password == password)
    }

    /// Number of identities held.
    pub async fn len(&self) -> usize {
        self.state.lock().await.users.len()
    }

    /// Whether no identity is held.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn verify_token(&self, token: &str) -> AppResult<Option<IdentityUser>> {
        let state = self.state.lock().await;
        Ok(state.tokens.get(token).and_then(|id| {
            state.users.get(id).map(|u| IdentityUser {
                id: *id,
                email: Some(u.email.clone()),
            })
        }))
    }

    async fn create_user(&self, email: &str, password: &str) -> AppResult<IdentityUser> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.email == email) {
            return Err(AppError::conflict(
                "A user with this email address has already been registered",
            ));
        }
        let id = AuthUserId::new();
        state.users.insert(
            id,
            StoredIdentity {
                email: email.to_string(),
                password: password.to_string(),
            },
        );
        Ok(IdentityUser {
            id,
            email: Some(email.to_string()),
        })
    }

    async fn update_email(&self, id: AuthUserId, email: &str) -> AppResult<()> {
        let mut state = self.state.lock().await;
        if state
            .users
            .iter()
            .any(|(other, u)| *other != id && u.email == email)
        {
            return Err(AppError::conflict(
                "A user with this email address has already been registered",
            ));
        }
        match state.users.get_mut(&id) {
            Some(user) => {
                user.email = email.to_string();
                Ok(())
            }
            None => Err(AppError::upstream(format!("User not found: {id}"))),
        }
    }

    async fn delete_user(&self, id: AuthUserId) -> AppResult<()> {
        let mut state = self.state.lock().await;
        state.users.remove(&id);
        state.tokens.retain(|_, subject| *subject != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_token_lifecycle() {
        let provider = MemoryIdentityProvider::new();
        let user = provider.create_user("ana@example.com", "secret").await.unwrap();
        let token = provider.issue_token(user.id).await.unwrap();

        let verified = provider.verify_token(&token).await.unwrap().unwrap();
        assert_eq!(verified.id, user.id);
        assert_eq!(verified.email.as_deref(), Some("ana@example.com"));

        provider.revoke_token(&token).await;
        assert!(provider.verify_token(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_invalidates_tokens() {
        let provider = MemoryIdentityProvider::new();
        let user = provider.create_user("ana@example.com", "secret").await.unwrap();
        let token = provider.issue_token(user.id).await.unwrap();
        provider.delete_user(user.id).await.unwrap();
        assert!(provider.verify_token(&token).await.unwrap().is_none());
        assert!(provider.is_empty().await);
        provider.delete_user(user.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let provider = MemoryIdentityProvider::new();
        provider.create_user("ana@example.com", "a").await.unwrap();
        assert!(provider.create_user("ana@example.com", "b").await.is_err());

        let luis = provider.create_user("luis@example.com", "pw").await.unwrap();
        assert!(provider.check_password(luis.id, "pw").await);
        assert!(provider.update_email(luis.id, "ana@example.com").await.is_err());
    }
}
