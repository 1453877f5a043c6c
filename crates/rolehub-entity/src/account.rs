//! Account (user profile) entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rolehub_core::types::{AccountId, AuthUserId, RoleId};

use crate::role::RoleName;

/// A registered account in the `usuarios` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account identifier.
    pub id: AccountId,
    /// Given name, trimmed and lower-cased.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Surname, trimmed and lower-cased.
    #[serde(rename = "apellido")]
    pub surname: String,
    /// Unique email, trimmed and lower-cased.
    pub email: String,
    /// Phone number, trimmed.
    #[serde(rename = "telefono")]
    pub phone: String,
    /// Optional postal address.
    #[serde(rename = "direccion")]
    pub address: Option<String>,
    /// Whether the account may authenticate.
    #[serde(rename = "estado")]
    pub active: bool,
    /// When the account was created.
    #[serde(rename = "creado_en")]
    pub created_at: DateTime<Utc>,
    /// Linked identity provider subject, if any.
    pub auth_user_id: Option<AuthUserId>,
}

/// An account joined with its role assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountWithRole {
    /// The account itself.
    #[serde(flatten)]
    pub account: Account,
    /// Assigned role, if any.
    pub rol_id: Option<RoleId>,
    /// Name of the assigned role, if any.
    pub rol_nombre: Option<RoleName>,
}

/// Insert payload for a new account row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    /// Given name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Surname.
    #[serde(rename = "apellido")]
    pub surname: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    #[serde(rename = "telefono")]
    pub phone: String,
    /// Optional postal address.
    #[serde(rename = "direccion")]
    pub address: Option<String>,
    /// Initial active flag.
    #[serde(rename = "estado")]
    pub active: bool,
    /// Identity provider subject created for this account.
    pub auth_user_id: AuthUserId,
}

impl NewAccount {
    /// Build a normalized insert payload. New accounts always start active.
    pub fn new(
        name: &str,
        surname: &str,
        email: &str,
        phone: &str,
        address: Option<&str>,
        auth_user_id: AuthUserId,
    ) -> Self {
        Self {
            name: normalize_text(name),
            surname: normalize_text(surname),
            email: normalize_email(email),
            phone: normalize_phone(phone),
            address: normalize_optional(address),
            active: true,
            auth_user_id,
        }
    }
}

/// Partial update of an account row. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountPatch {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// `Some(None)` clears the address.
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<Option<String>>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl AccountPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.surname.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.active.is_none()
    }

    /// Patch that only flips the active flag.
    pub fn active(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }
}

/// Trim and lower-case a name field.
pub fn normalize_text(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Trim and lower-case an email address.
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Trim a phone number.
pub fn normalize_phone(value: &str) -> String {
    value.trim().to_string()
}

/// Trim an optional free-text field; blank becomes `None`.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
