//! Account-to-role assignment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rolehub_core::types::{AccountId, AssignmentId, RoleId};

/// A row of `usuario_rol`. Each account has at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub id: AssignmentId,
    #[serde(rename = "usuario_id")]
    pub account_id: AccountId,
    #[serde(rename = "rol_id")]
    pub role_id: RoleId,
    #[serde(rename = "creado_en")]
    pub created_at: DateTime<Utc>,
}
