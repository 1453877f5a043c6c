//! `permisos` over REST.

use async_trait::async_trait;

use rolehub_core::result::AppResult;
use rolehub_core::types::RoleId;
use rolehub_entity::{Module, Permission, PermissionGrant};

use super::client::RestClient;
use super::query::{Order, Query};
use super::rows::{PermissionRow, map_permission};
use crate::traits::PermissionStore;

const TABLE: &str = "permisos";
const CONFLICT_TARGET: &str = "rol_id,modulo";

/// Permission store backed by the REST interface.
#[derive(Debug, Clone)]
pub struct RestPermissionStore {
    client: RestClient,
}

impl RestPermissionStore {
    /// Create a new permission store.
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PermissionStore for RestPermissionStore {
    async fn list_by_role(&self, role_id: RoleId) -> AppResult<Vec<Permission>> {
        let query = Query::new()
            .select("*")
            .eq("rol_id", role_id)
            .order("modulo", Order::Asc);
        let rows: Vec<PermissionRow> = self.client.select(TABLE, &query).await?;
        rows.into_iter().map(map_permission).collect()
    }

    async fn find(&self, role_id: RoleId, module: Module) -> AppResult<Option<Permission>> {
        let query = Query::new()
            .select("*")
            .eq("rol_id", role_id)
            .eq("modulo", module);
        self.client
            .select_one::<PermissionRow>(TABLE, &query)
            .await?
            .map(map_permission)
            .transpose()
    }

    async fn upsert_many(&self, grants: &[PermissionGrant]) -> AppResult<Vec<Permission>> {
        if grants.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<PermissionRow> = self.client.upsert(TABLE, grants, CONFLICT_TARGET).await?;
        rows.into_iter().map(map_permission).collect()
    }

    async fn delete(&self, role_id: RoleId, module: Module) -> AppResult<()> {
        let query = Query::new().eq("rol_id", role_id).eq("modulo", module);
        self.client.delete(TABLE, &query).await?;
        Ok(())
    }
}
