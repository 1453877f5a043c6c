//! # rolehub-auth
//!
//! Authentication and authorization for RoleHub.
//!
//! ## Modules
//!
//! - `identity`: bearer extraction and token verification against the provider
//! - `rbac`: per-role, per-module permission resolution and the request gate
//! - `context`: the authenticated caller attached to each request

pub mod context;
pub mod identity;
pub mod rbac;

pub use context::AuthContext;
pub use identity::{IdentityVerifier, extract_bearer};
pub use rbac::{AuthorizationGate, PermissionResolver, access_for_method};
