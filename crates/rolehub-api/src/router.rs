//! Route definitions for the RoleHub HTTP API.
//!
//! Every resource group is mounted under `/api` and guarded by bearer
//! authentication plus the permission check for its module. `/api/me` only
//! needs authentication.

use std::sync::Arc;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch, post},
};

use rolehub_entity::Module;

use crate::handlers;
use crate::middleware::{require_auth, require_module};
use crate::state::AppState;

/// Build the router with all routes. Cross-cutting layers are added by
/// [`build_app`](crate::app::build_app).
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest("/users", guarded(user_routes(), &state, Module::Usuarios))
        .nest("/roles", guarded(role_routes(), &state, Module::Roles))
        .nest("/permisos", guarded(permission_routes(), &state, Module::Permisos))
        .nest(
            "/usuario-rol",
            guarded(assignment_routes(), &state, Module::UsuarioRol),
        )
        .nest("/me", authenticated(me_routes(), &state));

    Router::new()
        .route("/", get(handlers::root::banner))
        .nest("/api", api_routes)
        .fallback(handlers::root::not_found)
        .with_state(state)
}

/// Bearer authentication on every route of `routes`.
fn authenticated(routes: Router<AppState>, state: &AppState) -> Router<AppState> {
    routes.route_layer(axum_middleware::from_fn_with_state(
        state.clone(),
        require_auth,
    ))
}

/// Authentication followed by the permission check for `module`.
fn guarded(routes: Router<AppState>, state: &AppState, module: Module) -> Router<AppState> {
    let routes = routes.route_layer(axum_middleware::from_fn(require_module(
        Arc::clone(&state.gate),
        module,
    )));
    authenticated(routes, state)
}

/// Accounts
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        .route("/{id}/estado", patch(handlers::user::set_user_estado))
}

/// Roles
fn role_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::role::list_roles).post(handlers::role::create_role),
        )
        .route(
            "/{id}",
            get(handlers::role::get_role)
                .put(handlers::role::update_role)
                .delete(handlers::role::delete_role),
        )
        .route("/{id}/estado", patch(handlers::role::set_role_estado))
}

/// Permissions per (role, module)
fn permission_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/rol/{rol_id}",
            get(handlers::permission::list_by_role).put(handlers::permission::set_for_role),
        )
        .route(
            "/rol/{rol_id}/modulo/{modulo}",
            get(handlers::permission::get_permission).delete(handlers::permission::remove),
        )
        .route("/upsert", post(handlers::permission::upsert))
        .route("/upsert-many", post(handlers::permission::upsert_many))
}

/// Role assignment
fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route("/assign", post(handlers::assignment::assign))
        .route(
            "/usuario/{usuario_id}",
            get(handlers::assignment::get_by_user).delete(handlers::assignment::remove),
        )
        .route(
            "/usuario/{usuario_id}/rol",
            get(handlers::assignment::get_role_id),
        )
}

/// Caller profile
fn me_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::me::me))
}
