//! Per-role, per-module permission records.

use serde::{Deserialize, Serialize};

use rolehub_core::types::{PermissionId, RoleId};

use crate::module::Module;

/// Kind of access a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Read,
    Create,
    Update,
    Delete,
}

/// The four verb flags of a permission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionFlags {
    #[serde(default)]
    pub puede_get: bool,
    #[serde(default)]
    pub puede_post: bool,
    #[serde(default)]
    pub puede_put: bool,
    #[serde(default)]
    pub puede_delete: bool,
}

impl PermissionFlags {
    /// Flags granting every access kind.
    pub fn all() -> Self {
        Self {
            puede_get: true,
            puede_post: true,
            puede_put: true,
            puede_delete: true,
        }
    }

    /// Whether the given access kind is granted.
    pub fn allows(&self, access: Access) -> bool {
        match access {
            Access::Read => self.puede_get,
            Access::Create => self.puede_post,
            Access::Update => self.puede_put,
            Access::Delete => self.puede_delete,
        }
    }
}

/// A row of the `permisos` table. At most one exists per (role, module).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    #[serde(rename = "rol_id")]
    pub role_id: RoleId,
    #[serde(rename = "modulo")]
    pub module: Module,
    #[serde(flatten)]
    pub flags: PermissionFlags,
}

impl Permission {
    /// Whether this permission grants the given access kind.
    pub fn allows(&self, access: Access) -> bool {
        self.flags.allows(access)
    }
}

/// Upsert payload keyed on `(rol_id, modulo)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    #[serde(rename = "rol_id")]
    pub role_id: RoleId,
    #[serde(rename = "modulo")]
    pub module: Module,
    #[serde(flatten)]
    pub flags: PermissionFlags,
}

impl PermissionGrant {
    /// Create a grant.
    pub fn new(role_id: RoleId, module: Module, flags: PermissionFlags) -> Self {
        Self {
            role_id,
            module,
            flags,
        }
    }
}
