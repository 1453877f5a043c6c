//! Authentication, profile and routing edge cases.

use http::StatusCode;

use rolehub_entity::AccountPatch;
use rolehub_store::AccountStore;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_root_banner() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("Microservicio de usuarios activo"));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/nada", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Ruta no encontrada.");
}

#[tokio::test]
async fn test_me_without_header_is_401() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "No autorizado: falta Bearer token.");
}

#[tokio::test]
async fn test_unknown_token_is_401() {
    let app = TestApp::new().await;
    let response = app
        .request("GET", "/api/users", None, Some("not-a-real-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "No autorizado: token inválido o expirado.");
}

#[tokio::test]
async fn test_me_returns_role_and_permissions() {
    let app = TestApp::new().await;
    let response = app.admin("GET", "/api/me", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["email"], "admin@rolehub.test");
    assert_eq!(response.body["rol"]["nombre"], "VENDEDOR");
    assert_eq!(response.body["permisos"].as_array().map(Vec::len), Some(15));
}

#[tokio::test]
async fn test_me_without_role() {
    let app = TestApp::new().await;
    let (token, _) = app.seed_user("sinrol@rolehub.test", None).await;

    let response = app.request("GET", "/api/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["rol"].is_null());
    assert_eq!(response.body["permisos"], serde_json::json!([]));

    let response = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.message(), "Acceso denegado: usuario sin rol asignado.");
}

#[tokio::test]
async fn test_inactive_account_is_forbidden() {
    let app = TestApp::new().await;
    let (token, account) = app.seed_account("inactivo@rolehub.test").await;
    AccountStore::update(&app.store, account.id, &AccountPatch::active(false))
        .await
        .unwrap();

    let response = app.request("GET", "/api/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.message(), "Acceso denegado: usuario inactivo.");
}

#[tokio::test]
async fn test_identity_without_account_is_forbidden() {
    let app = TestApp::new().await;
    let user = rolehub_store::IdentityProvider::create_user(
        &app.identity,
        "huerfano@rolehub.test",
        "secret123",
    )
    .await
    .unwrap();
    let token = app.identity.issue_token(user.id).await.unwrap();

    let response = app.request("GET", "/api/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.message(),
        "Acceso denegado: usuario no registrado en el sistema."
    );
}
