//! `usuario_rol` over REST.

use async_trait::async_trait;
use serde::Serialize;

use rolehub_core::result::AppResult;
use rolehub_core::types::{AccountId, RoleId};
use rolehub_entity::RoleAssignment;

use super::client::RestClient;
use super::error::RestError;
use super::query::Query;
use super::rows::{AssignmentRow, map_assignment};
use crate::traits::RoleAssignmentStore;

const TABLE: &str = "usuario_rol";

#[derive(Debug, Serialize)]
struct AssignmentPayload {
    usuario_id: AccountId,
    rol_id: RoleId,
}

/// Role assignment store backed by the REST interface.
#[derive(Debug, Clone)]
pub struct RestAssignmentStore {
    client: RestClient,
}

impl RestAssignmentStore {
    /// Create a new assignment store.
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleAssignmentStore for RestAssignmentStore {
    async fn find_by_account(&self, account_id: AccountId) -> AppResult<Option<RoleAssignment>> {
        let query = Query::new().select("*").eq("usuario_id", account_id);
        let row = self.client.select_one::<AssignmentRow>(TABLE, &query).await?;
        Ok(row.map(map_assignment))
    }

    async fn upsert(&self, account_id: AccountId, role_id: RoleId) -> AppResult<RoleAssignment> {
        let payload = [AssignmentPayload {
            usuario_id: account_id,
            rol_id: role_id,
        }];
        let rows: Vec<AssignmentRow> = self.client.upsert(TABLE, &payload, "usuario_id").await?;
        rows.into_iter()
            .next()
            .map(map_assignment)
            .ok_or_else(|| RestError::Empty(TABLE.to_string()).into())
    }

    async fn delete_by_account(&self, account_id: AccountId) -> AppResult<()> {
        let query = Query::new().eq("usuario_id", account_id);
        self.client.delete(TABLE, &query).await?;
        Ok(())
    }

    async fn count_by_role(&self, role_id: RoleId) -> AppResult<u64> {
        let query = Query::new().select("id").eq("rol_id", role_id);
        Ok(self.client.count(TABLE, &query).await?)
    }
}
