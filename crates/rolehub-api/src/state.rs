//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use rolehub_auth::{AuthorizationGate, IdentityVerifier, PermissionResolver};
use rolehub_store::Backends;
use rolehub_service::{
    AccountService, AssignmentService, PermissionService, ProfileService, RoleService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token verification
    pub verifier: Arc<IdentityVerifier>,
    /// Per-module permission gate
    pub gate: Arc<AuthorizationGate>,

    // ── Services ─────────────────────────────────────────────
    pub accounts: Arc<AccountService>,
    pub roles: Arc<RoleService>,
    pub permissions: Arc<PermissionService>,
    pub assignments: Arc<AssignmentService>,
    pub profile: Arc<ProfileService>,
}

impl AppState {
    /// Wire every service over one set of backends.
    pub fn new(backends: &Backends) -> Self {
        let resolver = PermissionResolver::new(Arc::clone(&backends.permissions));

        Self {
            verifier: Arc::new(IdentityVerifier::new(
                Arc::clone(&backends.identity),
                Arc::clone(&backends.accounts),
                Arc::clone(&backends.assignments),
            )),
            gate: Arc::new(AuthorizationGate::new(resolver.clone())),
            accounts: Arc::new(AccountService::new(
                Arc::clone(&backends.accounts),
                Arc::clone(&backends.assignments),
                Arc::clone(&backends.identity),
            )),
            roles: Arc::new(RoleService::new(
                Arc::clone(&backends.roles),
                Arc::clone(&backends.assignments),
            )),
            permissions: Arc::new(PermissionService::new(resolver.clone())),
            assignments: Arc::new(AssignmentService::new(
                Arc::clone(&backends.accounts),
                Arc::clone(&backends.roles),
                Arc::clone(&backends.assignments),
            )),
            profile: Arc::new(ProfileService::new(
                Arc::clone(&backends.accounts),
                Arc::clone(&backends.roles),
                resolver,
            )),
        }
    }
}
