//! `roles` over REST.

use async_trait::async_trait;

use rolehub_core::result::AppResult;
use rolehub_core::types::{Page, RoleId};
use rolehub_entity::{NewRole, Role, RoleName, RolePatch};

use super::client::RestClient;
use super::error::RestError;
use super::query::{Order, Query};
use super::rows::{RoleRow, map_role};
use crate::traits::{ListFilter, RoleStore};

const TABLE: &str = "roles";

/// Role store backed by the REST interface.
#[derive(Debug, Clone)]
pub struct RestRoleStore {
    client: RestClient,
}

impl RestRoleStore {
    /// Create a new role store.
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleStore for RestRoleStore {
    async fn list(&self, filter: &ListFilter) -> AppResult<Page<Role>> {
        let mut query = Query::new().select("*");
        if let Some(term) = filter.search_term() {
            query = query.ilike_any(&["nombre"], term);
        }
        if let Some(active) = filter.active {
            query = query.eq("estado", active);
        }
        let query = query
            .order("creado_en", Order::Desc)
            .range(filter.page.offset(), filter.page.limit);

        let (rows, total) = self.client.select_counted::<RoleRow>(TABLE, &query).await?;
        let data = rows.into_iter().map(map_role).collect::<AppResult<Vec<_>>>()?;
        Ok(Page::new(data, filter.page, total))
    }

    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>> {
        let query = Query::new().select("*").eq("id", id);
        self.client
            .select_one::<RoleRow>(TABLE, &query)
            .await?
            .map(map_role)
            .transpose()
    }

    async fn find_by_name(&self, name: RoleName) -> AppResult<Option<Role>> {
        let query = Query::new().select("*").eq("nombre", name);
        self.client
            .select_one::<RoleRow>(TABLE, &query)
            .await?
            .map(map_role)
            .transpose()
    }

    async fn insert(&self, role: &NewRole) -> AppResult<Role> {
        let rows: Vec<RoleRow> = self.client.insert(TABLE, &[role]).await?;
        match rows.into_iter().next() {
            Some(row) => map_role(row),
            None => Err(RestError::Empty(TABLE.to_string()).into()),
        }
    }

    async fn update(&self, id: RoleId, patch: &RolePatch) -> AppResult<Option<Role>> {
        let query = Query::new().eq("id", id);
        let rows: Vec<RoleRow> = self.client.update(TABLE, &query, patch).await?;
        rows.into_iter().next().map(map_role).transpose()
    }

    async fn delete(&self, id: RoleId) -> AppResult<bool> {
        let removed = self.client.delete(TABLE, &Query::new().eq("id", id)).await?;
        Ok(removed > 0)
    }
}
