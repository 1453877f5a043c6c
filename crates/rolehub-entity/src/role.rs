//! Role entity and the closed set of role names.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rolehub_core::AppError;
use rolehub_core::types::RoleId;

/// Names a role may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    /// Full administration.
    Admin,
    /// Stock management.
    Inventario,
    /// Sales back office.
    Ventas,
    /// Point-of-sale staff.
    Vendedor,
}

impl RoleName {
    /// Every valid role name.
    pub const ALL: [RoleName; 4] = [Self::Admin, Self::Inventario, Self::Ventas, Self::Vendedor];

    /// Return the stored name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Inventario => "INVENTARIO",
            Self::Ventas => "VENTAS",
            Self::Vendedor => "VENDEDOR",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = AppError;

    /// Trims and upper-cases the input before matching.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == upper)
            .ok_or_else(|| AppError::validation(format!("Nombre de rol inválido: {s}")))
    }
}

/// A role in the `roles` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role identifier.
    pub id: RoleId,
    /// Unique role name.
    #[serde(rename = "nombre")]
    pub name: RoleName,
    /// Optional description.
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    /// Whether the role can be assigned.
    #[serde(rename = "estado")]
    pub active: bool,
    /// When the role was created.
    #[serde(rename = "creado_en")]
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new role row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRole {
    #[serde(rename = "nombre")]
    pub name: RoleName,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "estado")]
    pub active: bool,
}

/// Partial update of a role row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RolePatch {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<RoleName>,
    /// `Some(None)` clears the description.
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl RolePatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.active.is_none()
    }

    /// Patch that only flips the active flag.
    pub fn active(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }
}
