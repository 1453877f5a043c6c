//! # rolehub-api
//!
//! HTTP API layer for RoleHub built on Axum.
//!
//! Provides the REST endpoints, middleware (authentication, module
//! authorization, CORS, request logging), extractors, DTOs, and error
//! mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
