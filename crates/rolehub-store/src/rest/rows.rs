//! Raw row shapes returned by the REST interface and their mapping into
//! entities. Nothing in here leaves the `rest` module untyped.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use rolehub_core::error::AppError;
use rolehub_core::result::AppResult;
use rolehub_core::types::{AccountId, AssignmentId, AuthUserId, PermissionId, RoleId};
use rolehub_entity::{
    Account, AccountWithRole, Module, Permission, PermissionFlags, Role, RoleAssignment, RoleName,
};

/// Embedded-resource selection used for account reads.
pub(crate) const ACCOUNT_WITH_ROLE_SELECT: &str = "*,usuario_rol(rol_id,roles(nombre))";

#[derive(Debug, Deserialize)]
pub(crate) struct AccountRow {
    id: AccountId,
    #[serde(default)]
    nombre: Option<String>,
    #[serde(default)]
    apellido: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    telefono: Option<String>,
    #[serde(default)]
    direccion: Option<String>,
    #[serde(default)]
    estado: Option<bool>,
    #[serde(default)]
    creado_en: Option<DateTime<Utc>>,
    #[serde(default)]
    auth_user_id: Option<AuthUserId>,
    #[serde(default)]
    usuario_rol: Option<Embedded<AssignmentEmbed>>,
}

/// A to-one embed arrives as an object or, without a unique key, as an
/// array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Embedded<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Embedded<T> {
    fn into_first(self) -> Option<T> {
        match self {
            Self::One(item) => Some(item),
            Self::Many(items) => items.into_iter().next(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssignmentEmbed {
    #[serde(default)]
    rol_id: Option<RoleId>,
    #[serde(default)]
    roles: Option<Embedded<RoleNameEmbed>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoleNameEmbed {
    #[serde(default)]
    nombre: Option<String>,
}

pub(crate) fn map_account(row: AccountRow) -> Account {
    Account {
        id: row.id,
        name: row.nombre.unwrap_or_default(),
        surname: row.apellido.unwrap_or_default(),
        email: row.email.unwrap_or_default(),
        phone: row.telefono.unwrap_or_default(),
        address: row.direccion,
        active: row.estado.unwrap_or(true),
        created_at: row.creado_en.unwrap_or_default(),
        auth_user_id: row.auth_user_id,
    }
}

pub(crate) fn map_account_with_role(mut row: AccountRow) -> AppResult<AccountWithRole> {
    let assignment = row.usuario_rol.take().and_then(Embedded::into_first);
    let (rol_id, rol_nombre) = match assignment {
        Some(embed) => {
            let name = embed
                .roles
                .and_then(Embedded::into_first)
                .and_then(|r| r.nombre)
                .map(|n| parse_role_name(&n))
                .transpose()?;
            (embed.rol_id, name)
        }
        None => (None, None),
    };
    Ok(AccountWithRole {
        account: map_account(row),
        rol_id,
        rol_nombre,
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoleRow {
    id: RoleId,
    nombre: String,
    #[serde(default)]
    descripcion: Option<String>,
    #[serde(default)]
    estado: Option<bool>,
    #[serde(default)]
    creado_en: Option<DateTime<Utc>>,
}

pub(crate) fn map_role(row: RoleRow) -> AppResult<Role> {
    Ok(Role {
        id: row.id,
        name: parse_role_name(&row.nombre)?,
        description: row.descripcion,
        active: row.estado.unwrap_or(true),
        created_at: row.creado_en.unwrap_or_default(),
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct PermissionRow {
    id: PermissionId,
    rol_id: RoleId,
    modulo: String,
    #[serde(default)]
    puede_get: Option<bool>,
    #[serde(default)]
    puede_post: Option<bool>,
    #[serde(default)]
    puede_put: Option<bool>,
    #[serde(default)]
    puede_delete: Option<bool>,
}

pub(crate) fn map_permission(row: PermissionRow) -> AppResult<Permission> {
    let module = Module::parse(&row.modulo).ok_or_else(|| {
        AppError::upstream(format!("Unexpected module stored for permission: {}", row.modulo))
    })?;
    Ok(Permission {
        id: row.id,
        role_id: row.rol_id,
        module,
        flags: PermissionFlags {
            puede_get: row.puede_get.unwrap_or(false),
            puede_post: row.puede_post.unwrap_or(false),
            puede_put: row.puede_put.unwrap_or(false),
            puede_delete: row.puede_delete.unwrap_or(false),
        },
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssignmentRow {
    id: AssignmentId,
    usuario_id: AccountId,
    rol_id: RoleId,
    #[serde(default)]
    creado_en: Option<DateTime<Utc>>,
}

pub(crate) fn map_assignment(row: AssignmentRow) -> RoleAssignment {
    RoleAssignment {
        id: row.id,
        account_id: row.usuario_id,
        role_id: row.rol_id,
        created_at: row.creado_en.unwrap_or_default(),
    }
}

fn parse_role_name(raw: &str) -> AppResult<RoleName> {
    raw.parse()
        .map_err(|_| AppError::upstream(format!("Unexpected role name stored: {raw}")))
}
