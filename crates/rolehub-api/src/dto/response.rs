//! Response DTOs.

use serde::{Deserialize, Serialize};

use rolehub_core::types::RoleId;

/// `{ "data": ... }` wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// `{ "ok": true }` returned by deletions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoleIdResponse {
    pub rol_id: RoleId,
}
