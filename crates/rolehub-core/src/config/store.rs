//! Backing store configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Connection settings for the hosted store and its identity provider.
///
/// Two credential tiers are used: the restricted key for ordinary
/// queries and the privileged key for identity administration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the hosted project, e.g. `https://xyz.example.co`.
    #[serde(default)]
    pub url: String,
    /// Restricted (anonymous) API key.
    #[serde(default)]
    pub anon_key: String,
    /// Privileged API key. Falls back to `anon_key` when unset.
    #[serde(default)]
    pub service_role_key: Option<String>,
    /// Per-request timeout applied to the HTTP client, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            service_role_key: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl StoreConfig {
    /// Key used for privileged calls.
    pub fn admin_key(&self) -> &str {
        match self.service_role_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => &self.anon_key,
        }
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Check that the required fields are present.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.url.trim().is_empty() {
            return Err(AppError::configuration("store.url is required"));
        }
        if self.anon_key.trim().is_empty() {
            return Err(AppError::configuration("store.anon_key is required"));
        }
        Ok(())
    }
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StoreConfig {
        StoreConfig {
            url: "https://project.example.co/".to_string(),
            anon_key: "anon".to_string(),
            ..StoreConfig::default()
        }
    }

    #[test]
    fn test_admin_key_fallback() {
        let mut cfg = config();
        assert_eq!(cfg.admin_key(), "anon");
        cfg.service_role_key = Some("  ".to_string());
        assert_eq!(cfg.admin_key(), "anon");
        cfg.service_role_key = Some("service".to_string());
        assert_eq!(cfg.admin_key(), "service");
    }

    #[test]
    fn test_base_url_trims_slash() {
        assert_eq!(config().base_url(), "https://project.example.co");
    }

    #[test]
    fn test_validate() {
        assert!(config().validate().is_ok());
        let mut cfg = config();
        cfg.url.clear();
        assert!(cfg.validate().is_err());
        let mut cfg = config();
        cfg.anon_key.clear();
        assert!(cfg.validate().is_err());
    }
}
