//! Client for the hosted auth server (`/auth/v1`).
//!
//! Token validation uses the restricted key; user administration uses
//! the privileged key.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use rolehub_core::config::store::StoreConfig;
use rolehub_core::error::{AppError, ErrorKind};
use rolehub_core::result::AppResult;
use rolehub_core::types::AuthUserId;

use crate::traits::{IdentityProvider, IdentityUser};

/// Identity provider speaking the GoTrue admin and user API.
#[derive(Debug, Clone)]
pub struct GoTrueIdentityProvider {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    admin_key: String,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    id: AuthUserId,
    #[serde(default)]
    email: Option<String>,
}

/// The auth server has used several error shapes over time.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

impl ErrorBody {
    fn text(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
    }
}

impl GoTrueIdentityProvider {
    /// Create a provider client.
    pub fn new(
        base_url: &str,
        anon_key: &str,
        admin_key: &str,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: format!("{}/auth/v1", base_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
            admin_key: admin_key.to_string(),
        })
    }

    /// Create a provider client from configuration.
    pub fn from_config(config: &StoreConfig) -> AppResult<Self> {
        Self::new(
            config.base_url(),
            &config.anon_key,
            config.admin_key(),
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    fn admin(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}/admin/users{path}", self.base_url))
            .header("apikey", &self.admin_key)
            .bearer_auth(&self.admin_key)
    }
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    async fn verify_token(&self, token: &str) -> AppResult<Option<IdentityUser>> {
        let response = self
            .http
            .get(format!("{}/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            debug!(status = status.as_u16(), "Identity provider rejected token");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(provider_error(response, "token validation").await);
        }
        let user: UserBody = response.json().await?;
        Ok(Some(IdentityUser {
            id: user.id,
            email: user.email,
        }))
    }

    async fn create_user(&self, email: &str, password: &str) -> AppResult<IdentityUser> {
        let response = self
            .admin(reqwest::Method::POST, "")
            .json(&json!({
                "email": email,
                "password": password,
                "email_confirm": true,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(provider_error(response, "user creation").await);
        }
        let user: UserBody = response.json().await?;
        info!(auth_user_id = %user.id, "Identity created");
        Ok(IdentityUser {
            id: user.id,
            email: user.email,
        })
    }

    async fn update_email(&self, id: AuthUserId, email: &str) -> AppResult<()> {
        let response = self
            .admin(reqwest::Method::PUT, &format!("/{id}"))
            .json(&json!({ "email": email, "email_confirm": true }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(provider_error(response, "email update").await);
        }
        info!(auth_user_id = %id, "Identity email updated");
        Ok(())
    }

    async fn delete_user(&self, id: AuthUserId) -> AppResult<()> {
        let response = self
            .admin(reqwest::Method::DELETE, &format!("/{id}"))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(auth_user_id = %id, "Identity already absent");
            return Ok(());
        }
        if !status.is_success() {
            return Err(provider_error(response, "user deletion").await);
        }
        info!(auth_user_id = %id, "Identity deleted");
        Ok(())
    }
}

async fn provider_error(response: reqwest::Response, action: &str) -> AppError {
    let status = response.status();
    let raw = response.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&raw).unwrap_or_default();
    let duplicate = status == StatusCode::UNPROCESSABLE_ENTITY
        && body.error_code.as_deref() == Some("email_exists");
    let text = body
        .text()
        .unwrap_or_else(|| format!("identity provider returned {status}"));
    let kind = if duplicate {
        ErrorKind::Conflict
    } else {
        ErrorKind::Upstream
    };
    AppError::new(kind, format!("Identity provider {action} failed: {text}"))
}
