//! Role assignment endpoints.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

async fn create_role(app: &TestApp, name: &str) -> String {
    let response = app
        .admin("POST", "/api/roles", Some(json!({"nombre": name})))
        .await;
    response.body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_reassignment_keeps_single_role() {
    let app = TestApp::new().await;
    let (_, account) = app.seed_account("ana@example.com").await;
    let ventas = create_role(&app, "VENTAS").await;
    let admin = create_role(&app, "ADMIN").await;
    let usuario_id = account.id.to_string();

    for rol_id in [&ventas, &admin] {
        let response = app
            .admin(
                "POST",
                "/api/usuario-rol/assign",
                Some(json!({"usuario_id": usuario_id, "rol_id": rol_id})),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app
        .admin(
            "GET",
            &format!("/api/usuario-rol/usuario/{usuario_id}/rol"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"rol_id": admin}));

    let response = app
        .admin("DELETE", &format!("/api/roles/{ventas}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_remove_assignment() {
    let app = TestApp::new().await;
    let (_, account) = app.seed_account("ana@example.com").await;
    let rol_id = create_role(&app, "VENTAS").await;
    let path = format!("/api/usuario-rol/usuario/{}", account.id);

    app.admin(
        "POST",
        "/api/usuario-rol/assign",
        Some(json!({"usuario_id": account.id.to_string(), "rol_id": rol_id})),
    )
    .await;

    let response = app.admin("GET", &path, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["rol_id"], rol_id.as_str());

    let response = app.admin("DELETE", &path, None).await;
    assert_eq!(response.body, json!({"ok": true}));

    let response = app.admin("GET", &path, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "El usuario no tiene rol asignado.");
}

#[tokio::test]
async fn test_assign_validation_and_guards() {
    let app = TestApp::new().await;

    let response = app
        .admin("POST", "/api/usuario-rol/assign", Some(json!({"rol_id": "x"})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "usuario_id es requerido.");

    let (_, account) = app.seed_account("ana@example.com").await;
    let rol_id = create_role(&app, "INVENTARIO").await;
    app.admin(
        "PATCH",
        &format!("/api/roles/{rol_id}/estado"),
        Some(json!({"estado": false})),
    )
    .await;

    let response = app
        .admin(
            "POST",
            "/api/usuario-rol/assign",
            Some(json!({"usuario_id": account.id.to_string(), "rol_id": rol_id})),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message(), "No se puede asignar un rol inactivo.");
}
