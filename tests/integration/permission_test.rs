//! Module authorization and permission maintenance.

use http::StatusCode;
use serde_json::json;

use rolehub_entity::{Module, PermissionFlags, RoleName};

use crate::helpers::TestApp;

fn read_only() -> PermissionFlags {
    PermissionFlags {
        puede_get: true,
        ..PermissionFlags::default()
    }
}

#[tokio::test]
async fn test_verb_is_checked_against_flags() {
    let app = TestApp::new().await;
    let grants = [(Module::Usuarios, read_only())];
    let (token, _) = app
        .seed_user("lector@rolehub.test", Some((RoleName::Inventario, &grants[..])))
        .await;

    let response = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({
                "nombre": "Luis",
                "apellido": "Soto",
                "email": "luis@rolehub.test",
                "telefono": "555",
                "password": "secret123"
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.message(),
        "Acceso denegado: no tienes permiso para POST en USUARIOS."
    );
}

#[tokio::test]
async fn test_missing_module_row_denies() {
    let app = TestApp::new().await;
    let grants = [(Module::Usuarios, PermissionFlags::all())];
    let (token, _) = app
        .seed_user("parcial@rolehub.test", Some((RoleName::Ventas, &grants[..])))
        .await;

    let response = app.request("GET", "/api/roles", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.message(),
        "Acceso denegado: el rol no tiene permisos definidos para el módulo ROLES."
    );
}

#[tokio::test]
async fn test_upsert_is_idempotent() {
    let app = TestApp::new().await;
    let role_id = app.admin_role.to_string();
    let body = json!({
        "rol_id": role_id,
        "modulo": "PRODUCTOS",
        "puede_get": true,
        "puede_post": false
    });

    let first = app.admin("POST", "/api/permisos/upsert", Some(body.clone())).await;
    assert_eq!(first.status, StatusCode::OK);
    let second = app.admin("POST", "/api/permisos/upsert", Some(body)).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(first.body["id"], second.body["id"]);

    let path = format!("/api/permisos/rol/{role_id}/modulo/PRODUCTOS");
    let response = app.admin("GET", &path, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["puede_get"], true);
    assert_eq!(response.body["puede_post"], false);

    let list = app
        .admin("GET", &format!("/api/permisos/rol/{role_id}"), None)
        .await;
    assert_eq!(list.body["data"].as_array().map(Vec::len), Some(15));
}

#[tokio::test]
async fn test_upsert_validation() {
    let app = TestApp::new().await;

    let response = app
        .admin("POST", "/api/permisos/upsert", Some(json!({"modulo": "VENTAS"})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "rol_id es requerido.");

    let response = app
        .admin(
            "POST",
            "/api/permisos/upsert",
            Some(json!({"rol_id": app.admin_role.to_string(), "modulo": "NOMINA"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "modulo inválido.");

    let response = app
        .admin("POST", "/api/permisos/upsert-many", Some(json!([])))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Debe enviar un array de permisos.");
}

#[tokio::test]
async fn test_upsert_many_and_remove() {
    let app = TestApp::new().await;
    let created = app
        .admin("POST", "/api/roles", Some(json!({"nombre": "ventas"})))
        .await;
    let role_id = created.body["id"].as_str().unwrap().to_string();

    let response = app
        .admin(
            "POST",
            "/api/permisos/upsert-many",
            Some(json!([
                {"rol_id": role_id, "modulo": "VENTAS", "puede_get": true},
                {"rol_id": role_id, "modulo": "COMPRAS", "puede_get": true, "puede_put": true}
            ])),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"].as_array().map(Vec::len), Some(2));

    let path = format!("/api/permisos/rol/{role_id}/modulo/VENTAS");
    let response = app.admin("DELETE", &path, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"ok": true}));

    let response = app.admin("GET", &path, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Permiso no encontrado.");

    let response = app
        .admin(
            "GET",
            &format!("/api/permisos/rol/{role_id}/modulo/ventas"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Módulo inválido.");
}

#[tokio::test]
async fn test_set_permissions_by_module_map() {
    let app = TestApp::new().await;
    let created = app
        .admin("POST", "/api/roles", Some(json!({"nombre": "INVENTARIO"})))
        .await;
    let role_id = created.body["id"].as_str().unwrap().to_string();
    let path = format!("/api/permisos/rol/{role_id}");

    let response = app
        .admin(
            "PUT",
            &path,
            Some(json!({
                "PRODUCTOS": {"puede_get": true, "puede_post": true},
                "MARCAS": {"puede_get": true}
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let list = app.admin("GET", &path, None).await;
    let modules: Vec<&str> = list.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["modulo"].as_str())
        .collect();
    assert_eq!(modules, vec!["MARCAS", "PRODUCTOS"]);

    let response = app
        .admin("PUT", &path, Some(json!({"NOMINA": {"puede_get": true}})))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Modulo inválido: NOMINA");
}
