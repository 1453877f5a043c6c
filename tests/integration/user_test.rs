//! Account endpoints, including the identity provider side effects.

use http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::TestApp;

fn new_user(email: &str) -> Value {
    json!({
        "nombre": "  Ana ",
        "apellido": "Ruiz",
        "email": email,
        "telefono": " 555-1234 ",
        "password": "secret123"
    })
}

#[tokio::test]
async fn test_create_user() {
    let app = TestApp::new().await;
    let before = app.identity.len().await;

    let response = app
        .admin("POST", "/api/users", Some(new_user("Ana@Example.com")))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["nombre"], "Ana");
    assert_eq!(response.body["email"], "ana@example.com");
    assert_eq!(response.body["estado"], true);
    assert!(response.body["auth_user_id"].is_string());
    assert_eq!(app.identity.len().await, before + 1);
}

#[tokio::test]
async fn test_duplicate_email_conflicts_without_identity() {
    let app = TestApp::new().await;
    app.admin("POST", "/api/users", Some(new_user("ana@example.com")))
        .await;
    let before = app.identity.len().await;

    let response = app
        .admin("POST", "/api/users", Some(new_user("ANA@example.com")))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.message(), "Ya existe un usuario con ese email.");
    assert_eq!(app.identity.len().await, before);
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::new().await;
    let mut body = new_user("not-an-email");
    let response = app.admin("POST", "/api/users", Some(body.clone())).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "El email no es válido.");

    body["email"] = json!("ok@example.com");
    body["password"] = json!("123");
    let response = app.admin("POST", "/api/users", Some(body)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_with_role_join() {
    let app = TestApp::new().await;
    for i in 0..3 {
        app.admin(
            "POST",
            "/api/users",
            Some(new_user(&format!("user{i}@example.com"))),
        )
        .await;
    }

    let response = app.admin("GET", "/api/users?page=1&limit=2", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["total"], 4);
    assert_eq!(response.body["totalPages"], 2);
    assert_eq!(response.body["data"].as_array().map(Vec::len), Some(2));

    let response = app
        .admin("GET", "/api/users?search=admin@rolehub", None)
        .await;
    assert_eq!(response.body["total"], 1);
    assert_eq!(response.body["data"][0]["rol_nombre"], "VENDEDOR");

    let response = app.admin("GET", "/api/users?estado=false", None).await;
    assert_eq!(response.body["total"], 0);
    assert_eq!(response.body["totalPages"], 1);
}

#[tokio::test]
async fn test_update_and_toggle() {
    let app = TestApp::new().await;
    let created = app
        .admin("POST", "/api/users", Some(new_user("ana@example.com")))
        .await;
    let id = created.body["id"].as_str().unwrap().to_string();
    let path = format!("/api/users/{id}");

    let response = app
        .admin(
            "PUT",
            &path,
            Some(json!({"telefono": "999", "direccion": "Calle 1", "email": "ana.r@example.com"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["telefono"], "999");
    assert_eq!(response.body["direccion"], "Calle 1");
    assert_eq!(response.body["email"], "ana.r@example.com");

    let response = app.admin("PUT", &path, Some(json!({}))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "No hay campos para actualizar.");

    let response = app
        .admin(
            "PATCH",
            &format!("{path}/estado"),
            Some(json!({"estado": false})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["estado"], false);

    let response = app
        .admin(
            "PATCH",
            &format!("{path}/estado"),
            Some(json!({"estado": "notabool"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "El campo 'estado' debe ser true o false.");
}

#[tokio::test]
async fn test_padded_email_accepted() {
    let app = TestApp::new().await;
    let response = app
        .admin("POST", "/api/users", Some(new_user(" Ana@Example.com ")))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["email"], "ana@example.com");
}

#[tokio::test]
async fn test_page_far_past_the_end_is_empty() {
    let app = TestApp::new().await;
    let response = app
        .admin("GET", "/api/users?page=1e18&limit=100", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], json!([]));
    assert_eq!(response.body["total"], 1);
    assert_eq!(response.body["limit"], 100);

    let response = app
        .admin("GET", "/api/roles?page=99999999999999999999", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], json!([]));
}

#[tokio::test]
async fn test_delete_removes_identity() {
    let app = TestApp::new().await;
    let created = app
        .admin("POST", "/api/users", Some(new_user("ana@example.com")))
        .await;
    let path = format!("/api/users/{}", created.body["id"].as_str().unwrap());
    let before = app.identity.len().await;

    let response = app.admin("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"ok": true}));
    assert_eq!(app.identity.len().await, before - 1);

    let response = app.admin("GET", &path, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Usuario no encontrado.");

    let response = app.admin("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let app = TestApp::new().await;
    let response = app
        .admin("POST", "/api/users", Some(json!({"nombre": 42})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.message().starts_with("Cuerpo de la solicitud inválido"));
}
