//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use rolehub_core::config::CorsConfig;
use rolehub_core::types::RoleId;
use rolehub_entity::{
    Account, Module, NewAccount, NewRole, PermissionFlags, PermissionGrant, RoleName,
};
use rolehub_store::memory::{MemoryIdentityProvider, MemoryStore};
use rolehub_store::{
    AccountStore, Backends, IdentityProvider, PermissionStore, RoleAssignmentStore, RoleStore,
};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared in-memory tables
    pub store: MemoryStore,
    /// In-memory identity provider
    pub identity: MemoryIdentityProvider,
    /// Token of a seeded account whose role holds every permission
    pub admin_token: String,
    /// Role of the seeded admin
    pub admin_role: RoleId,
}

impl TestApp {
    /// Create a new test application with a seeded administrator.
    ///
    /// The administrator's role is VENDEDOR so the other role names stay
    /// free for the role tests.
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        let identity = MemoryIdentityProvider::new();

        let state = rolehub_api::AppState::new(&Backends::in_memory(&store, &identity));
        let router = rolehub_api::build_app(state, &CorsConfig::default());

        let mut app = Self {
            router,
            store,
            identity,
            admin_token: String::new(),
            admin_role: RoleId::new(),
        };

        let all: Vec<(Module, PermissionFlags)> = Module::ALL
            .iter()
            .map(|m| (*m, PermissionFlags::all()))
            .collect();
        let (token, role_id) = app
            .seed_user("admin@rolehub.test", Some((RoleName::Vendedor, all.as_slice())))
            .await;
        app.admin_token = token;
        app.admin_role = role_id.expect("admin role");
        app
    }

    /// Create an identity, an account and optionally a role with grants.
    /// Returns a valid bearer token and the role id.
    pub async fn seed_user(
        &self,
        email: &str,
        role: Option<(RoleName, &[(Module, PermissionFlags)])>,
    ) -> (String, Option<RoleId>) {
        let (token, account) = self.seed_account(email).await;

        let role_id = match role {
            Some((name, grants)) => {
                let role = RoleStore::insert(
                    &self.store,
                    &NewRole {
                        name,
                        description: None,
                        active: true,
                    },
                )
                .await
                .expect("Failed to create role");
                let grants: Vec<PermissionGrant> = grants
                    .iter()
                    .map(|(module, flags)| PermissionGrant::new(role.id, *module, *flags))
                    .collect();
                PermissionStore::upsert_many(&self.store, &grants)
                    .await
                    .expect("Failed to grant permissions");
                RoleAssignmentStore::upsert(&self.store, account.id, role.id)
                    .await
                    .expect("Failed to assign role");
                Some(role.id)
            }
            None => None,
        };

        (token, role_id)
    }

    /// Identity plus account row, no role.
    pub async fn seed_account(&self, email: &str) -> (String, Account) {
        let user = self
            .identity
            .create_user(email, "secret123")
            .await
            .expect("Failed to create identity");
        let account = AccountStore::insert(
            &self.store,
            &NewAccount::new("Test", "User", email, "555000", None, user.id),
        )
        .await
        .expect("Failed to create account");
        let token = self
            .identity
            .issue_token(user.id)
            .await
            .expect("Failed to issue token");
        (token, account)
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body, text }
    }

    /// Request as the seeded admin.
    pub async fn admin(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.request(method, path, body, Some(&self.admin_token))
            .await
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
    /// Raw body
    pub text: String,
}

impl TestResponse {
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}
