//! Request DTOs with validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use rolehub_core::error::AppError;
use rolehub_core::result::AppResult;
use rolehub_core::types::{AccountId, RoleId};
use rolehub_entity::{Module, PermissionFlags, PermissionGrant};
use rolehub_service::{CreateAccountInput, CreateRoleInput, UpdateAccountInput, UpdateRoleInput};

const ESTADO_INVALID: &str = "El campo 'estado' debe ser true o false.";

/// Create user request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(custom(function = "not_blank", message = "El nombre es requerido."))]
    pub nombre: String,
    #[validate(custom(function = "not_blank", message = "El apellido es requerido."))]
    pub apellido: String,
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "El email no es válido."))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "El teléfono es requerido."))]
    pub telefono: String,
    pub direccion: Option<String>,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres."))]
    pub password: String,
}

impl From<CreateUserRequest> for CreateAccountInput {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.nombre,
            surname: req.apellido,
            email: req.email,
            phone: req.telefono,
            address: req.direccion,
            password: req.password,
        }
    }
}

/// Partial user update. `direccion: null` clears the address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(custom(function = "not_blank", message = "El nombre no puede estar vacío."))]
    pub nombre: Option<String>,
    #[validate(custom(function = "not_blank", message = "El apellido no puede estar vacío."))]
    pub apellido: Option<String>,
    #[serde(default, deserialize_with = "trimmed_opt")]
    #[validate(email(message = "El email no es válido."))]
    pub email: Option<String>,
    #[validate(custom(function = "not_blank", message = "El teléfono no puede estar vacío."))]
    pub telefono: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub direccion: Option<Option<String>>,
    #[serde(default)]
    pub estado: Option<Value>,
}

impl UpdateUserRequest {
    pub fn into_input(self) -> AppResult<UpdateAccountInput> {
        Ok(UpdateAccountInput {
            active: optional_estado(self.estado.as_ref())?,
            name: self.nombre,
            surname: self.apellido,
            email: self.email,
            phone: self.telefono,
            address: self.direccion,
        })
    }
}

/// Body of the `PATCH .../estado` endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstadoRequest {
    #[serde(default)]
    pub estado: Value,
}

impl EstadoRequest {
    /// A boolean, or the strings `"true"` / `"false"`.
    pub fn value(&self) -> AppResult<bool> {
        parse_estado(&self.estado).ok_or_else(|| AppError::validation(ESTADO_INVALID))
    }
}

/// Create role request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(custom(function = "not_blank", message = "El nombre del rol es requerido."))]
    pub nombre: String,
    pub descripcion: Option<String>,
}

impl From<CreateRoleRequest> for CreateRoleInput {
    fn from(req: CreateRoleRequest) -> Self {
        Self {
            name: req.nombre,
            description: req.descripcion,
        }
    }
}

/// Partial role update. `descripcion: null` clears the description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<Option<String>>,
    #[serde(default)]
    pub estado: Option<Value>,
}

impl UpdateRoleRequest {
    pub fn into_input(self) -> AppResult<UpdateRoleInput> {
        Ok(UpdateRoleInput {
            active: optional_estado(self.estado.as_ref())?,
            name: self.nombre,
            description: self.descripcion,
        })
    }
}

/// One permission row to create or overwrite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermisoUpsertRequest {
    #[serde(default)]
    pub rol_id: Option<String>,
    #[serde(default)]
    pub modulo: Option<String>,
    #[serde(flatten)]
    pub flags: PermissionFlags,
}

impl PermisoUpsertRequest {
    /// Validate a single upsert body.
    pub fn into_grant(self) -> AppResult<PermissionGrant> {
        let role_id = required_id::<RoleId>(self.rol_id.as_deref(), "rol_id")?;
        let module = self
            .modulo
            .as_deref()
            .and_then(Module::parse)
            .ok_or_else(|| AppError::validation("modulo inválido."))?;
        Ok(PermissionGrant::new(role_id, module, self.flags))
    }

    /// Validate a batch body: a non-empty array of upsert items.
    pub fn batch(body: Value) -> AppResult<Vec<PermissionGrant>> {
        let items = match body {
            Value::Array(items) if !items.is_empty() => items,
            _ => return Err(AppError::validation("Debe enviar un array de permisos.")),
        };

        items
            .into_iter()
            .map(|item| -> AppResult<PermissionGrant> {
                let req: PermisoUpsertRequest = serde_json::from_value(item)
                    .map_err(|e| AppError::validation(format!("Permiso inválido: {e}")))?;
                let role_id = req
                    .rol_id
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| AppError::validation("Cada permiso debe incluir rol_id."))?;
                let role_id: RoleId = role_id
                    .parse()
                    .map_err(|_| AppError::validation(format!("rol_id inválido: {role_id}")))?;
                let module = match req.modulo.as_deref() {
                    Some(raw) => Module::parse(raw),
                    None => None,
                }
                .ok_or_else(|| {
                    AppError::validation(format!(
                        "Modulo inválido: {}",
                        req.modulo.as_deref().unwrap_or("null")
                    ))
                })?;
                Ok(PermissionGrant::new(role_id, module, req.flags))
            })
            .collect()
    }

    /// Validate a `{ MODULO: flags }` map for one role.
    pub fn by_module(
        body: BTreeMap<String, PermissionFlags>,
    ) -> AppResult<BTreeMap<Module, PermissionFlags>> {
        body.into_iter()
            .map(|(raw, flags)| {
                Module::parse(&raw)
                    .map(|module| (module, flags))
                    .ok_or_else(|| AppError::validation(format!("Modulo inválido: {raw}")))
            })
            .collect()
    }
}

/// Role assignment body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignRoleRequest {
    #[serde(default)]
    pub usuario_id: Option<String>,
    #[serde(default)]
    pub rol_id: Option<String>,
}

impl AssignRoleRequest {
    pub fn ids(&self) -> AppResult<(AccountId, RoleId)> {
        let account_id = required_id(self.usuario_id.as_deref(), "usuario_id")?;
        let role_id = required_id(self.rol_id.as_deref(), "rol_id")?;
        Ok((account_id, role_id))
    }
}

/// `"{field} es requerido."` when blank, `"{field} inválido: x"` when not a UUID.
fn required_id<T: std::str::FromStr>(raw: Option<&str>, field: &str) -> AppResult<T> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation(format!("{field} es requerido.")))?;
    raw.parse()
        .map_err(|_| AppError::validation(format!("{field} inválido: {raw}")))
}

fn parse_estado(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => crate::extractors::list_query::parse_bool(s),
        _ => None,
    }
}

fn optional_estado(value: Option<&Value>) -> AppResult<Option<bool>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => parse_estado(v)
            .map(Some)
            .ok_or_else(|| AppError::validation(ESTADO_INVALID)),
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Surrounding whitespace is dropped before validation sees the value.
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

fn trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|s| s.map(|s| s.trim().to_string()))
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
