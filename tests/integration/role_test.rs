//! Role endpoints.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_role_and_duplicate() {
    let app = TestApp::new().await;

    let response = app
        .admin("POST", "/api/roles", Some(json!({"nombre": "admin"})))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["nombre"], "ADMIN");
    assert_eq!(response.body["estado"], true);

    let response = app
        .admin("POST", "/api/roles", Some(json!({"nombre": "ADMIN"})))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message(), "Ya existe un rol con nombre ADMIN");
}

#[tokio::test]
async fn test_invalid_role_name() {
    let app = TestApp::new().await;
    let response = app
        .admin("POST", "/api/roles", Some(json!({"nombre": "gerente"})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Nombre de rol inválido: gerente");

    let response = app.admin("POST", "/api/roles", Some(json!({}))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patch_estado() {
    let app = TestApp::new().await;
    let created = app
        .admin("POST", "/api/roles", Some(json!({"nombre": "VENTAS"})))
        .await;
    let path = format!("/api/roles/{}/estado", created.body["id"].as_str().unwrap());

    let response = app
        .admin("PATCH", &path, Some(json!({"estado": "notabool"})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "El campo 'estado' debe ser true o false.");

    let response = app
        .admin("PATCH", &path, Some(json!({"estado": "false"})))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["estado"], false);
}

#[tokio::test]
async fn test_list_filters() {
    let app = TestApp::new().await;
    app.admin("POST", "/api/roles", Some(json!({"nombre": "ADMIN"})))
        .await;
    app.admin("POST", "/api/roles", Some(json!({"nombre": "VENTAS"})))
        .await;

    let response = app.admin("GET", "/api/roles?limit=2", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"], 3);
    assert_eq!(response.body["limit"], 2);
    assert_eq!(response.body["totalPages"], 2);

    let response = app.admin("GET", "/api/roles?search=vent", None).await;
    assert_eq!(response.body["total"], 1);
    assert_eq!(response.body["data"][0]["nombre"], "VENTAS");
}

#[tokio::test]
async fn test_update_rename_conflict() {
    let app = TestApp::new().await;
    let ventas = app
        .admin("POST", "/api/roles", Some(json!({"nombre": "VENTAS"})))
        .await;
    app.admin("POST", "/api/roles", Some(json!({"nombre": "ADMIN"})))
        .await;
    let path = format!("/api/roles/{}", ventas.body["id"].as_str().unwrap());

    let response = app
        .admin("PUT", &path, Some(json!({"nombre": "admin"})))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message(), "Ya existe otro rol con nombre ADMIN");

    let response = app
        .admin("PUT", &path, Some(json!({"descripcion": "Equipo comercial"})))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["descripcion"], "Equipo comercial");

    let response = app.admin("PUT", &path, Some(json!({}))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "No hay campos para actualizar.");
}

#[tokio::test]
async fn test_delete_guard_keeps_role() {
    let app = TestApp::new().await;
    let path = format!("/api/roles/{}", app.admin_role);

    let response = app.admin("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.message(),
        "No puedes eliminar este rol porque está asignado a usuarios."
    );

    let response = app.admin("GET", &path, None).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_unassigned_role() {
    let app = TestApp::new().await;
    let created = app
        .admin("POST", "/api/roles", Some(json!({"nombre": "INVENTARIO"})))
        .await;
    let path = format!("/api/roles/{}", created.body["id"].as_str().unwrap());

    let response = app.admin("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"ok": true}));

    let response = app.admin("GET", &path, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Rol no encontrado.");
}

#[tokio::test]
async fn test_malformed_id_is_400() {
    let app = TestApp::new().await;
    let response = app.admin("GET", "/api/roles/123", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Id inválido: 123");
}
