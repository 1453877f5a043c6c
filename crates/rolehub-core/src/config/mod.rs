//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! `config/default.toml`, an optional environment overlay and `ROLEHUB__`
//! prefixed environment variables.

pub mod app;
pub mod logging;
pub mod store;

pub use self::app::{CorsConfig, ServerConfig};
pub use self::logging::{LogFormat, LoggingConfig};
pub use self::store::StoreConfig;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Hosted store and identity provider settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Unprefixed variables understood for compatibility with existing
/// deployments. They override every other source when set.
const LEGACY_VARS: &[(&str, &str)] = &[
    ("SUPABASE_URL", "store.url"),
    ("SUPABASE_KEY", "store.anon_key"),
    ("SUPABASE_SERVICE_ROLE_KEY", "store.service_role_key"),
    ("PORT", "server.port"),
];

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `ROLEHUB__`. Fails when the
    /// store section is incomplete.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("ROLEHUB")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allowed_origins")
                    .with_list_parse_key("server.cors.allowed_methods")
                    .try_parsing(true),
            );

        for (key, value) in legacy_overrides(|name| std::env::var(name).ok()) {
            builder = builder
                .set_override(key, value)
                .map_err(|e| AppError::configuration(format!("Invalid override {key}: {e}")))?;
        }
        if let Some(origins) = std::env::var("CORS_ORIGIN")
            .or_else(|_| std::env::var("FRONTEND_URL"))
            .ok()
            .map(|raw| app::CorsConfig::parse_origins(&raw))
            .filter(|origins| !origins.is_empty())
        {
            builder = builder
                .set_override("server.cors.allowed_origins", origins)
                .map_err(|e| AppError::configuration(format!("Invalid CORS origin list: {e}")))?;
        }

        let config = builder
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let app: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        app.store.validate()?;
        Ok(app)
    }
}

/// Collect the legacy variable overrides that are set and non-blank.
fn legacy_overrides(lookup: impl Fn(&str) -> Option<String>) -> Vec<(&'static str, String)> {
    LEGACY_VARS
        .iter()
        .filter_map(|(var, key)| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (*key, v))
        })
        .collect()
}
