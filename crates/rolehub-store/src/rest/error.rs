//! Errors raised by the REST store client.

use serde::Deserialize;
use thiserror::Error;

use rolehub_core::error::{AppError, ErrorKind};

/// Postgres error code for a unique constraint violation.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Error body returned by the REST interface.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

/// Failure talking to the store.
#[derive(Debug, Error)]
pub enum RestError {
    /// The request never produced a response.
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with an error status.
    #[error("store returned {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
        details: Option<String>,
    },

    /// A response body did not match the expected shape.
    #[error("unexpected store response for {table}: {source}")]
    Decode {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    /// A successful response returned no row where one was required.
    #[error("store returned no row for {0}")]
    Empty(String),
}

impl RestError {
    /// Build an API error from a status and a raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .or(parsed.hint)
            .unwrap_or_else(|| body.chars().take(200).collect());
        Self::Api {
            status,
            code: parsed.code,
            message,
            details: parsed.details,
        }
    }

    /// Whether this is a unique constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::Api { code: Some(code), .. } if code == UNIQUE_VIOLATION)
    }
}

impl From<RestError> for AppError {
    fn from(err: RestError) -> Self {
        let kind = if err.is_unique_violation() {
            ErrorKind::Conflict
        } else {
            ErrorKind::Upstream
        };
        let message = match &err {
            RestError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        };
        AppError::with_source(kind, message, err)
    }
}
