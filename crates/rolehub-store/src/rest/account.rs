//! `usuarios` over REST.

use async_trait::async_trait;

use rolehub_core::result::AppResult;
use rolehub_core::types::{AccountId, AuthUserId, Page};
use rolehub_entity::{Account, AccountPatch, AccountWithRole, NewAccount};

use super::client::RestClient;
use super::error::RestError;
use super::query::{Order, Query};
use super::rows::{ACCOUNT_WITH_ROLE_SELECT, AccountRow, map_account, map_account_with_role};
use crate::traits::{AccountStore, ListFilter};

const TABLE: &str = "usuarios";

/// Account store backed by the REST interface.
#[derive(Debug, Clone)]
pub struct RestAccountStore {
    client: RestClient,
}

impl RestAccountStore {
    /// Create a new account store.
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountStore for RestAccountStore {
    async fn list(&self, filter: &ListFilter) -> AppResult<Page<AccountWithRole>> {
        let mut query = Query::new().select(ACCOUNT_WITH_ROLE_SELECT);
        if let Some(term) = filter.search_term() {
            query = query.ilike_any(&["nombre", "apellido", "email"], term);
        }
        if let Some(active) = filter.active {
            query = query.eq("estado", active);
        }
        let query = query
            .order("creado_en", Order::Desc)
            .range(filter.page.offset(), filter.page.limit);

        let (rows, total) = self.client.select_counted::<AccountRow>(TABLE, &query).await?;
        let data = rows
            .into_iter()
            .map(map_account_with_role)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Page::new(data, filter.page, total))
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<AccountWithRole>> {
        let query = Query::new().select(ACCOUNT_WITH_ROLE_SELECT).eq("id", id);
        self.client
            .select_one::<AccountRow>(TABLE, &query)
            .await?
            .map(map_account_with_role)
            .transpose()
    }

    async fn find_by_auth_user(&self, subject: AuthUserId) -> AppResult<Option<Account>> {
        let query = Query::new().select("*").eq("auth_user_id", subject);
        let row = self.client.select_one::<AccountRow>(TABLE, &query).await?;
        Ok(row.map(map_account))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let query = Query::new().select("*").eq("email", email);
        let row = self.client.select_one::<AccountRow>(TABLE, &query).await?;
        Ok(row.map(map_account))
    }

    async fn insert(&self, account: &NewAccount) -> AppResult<Account> {
        let rows: Vec<AccountRow> = self.client.insert(TABLE, &[account]).await?;
        rows.into_iter()
            .next()
            .map(map_account)
            .ok_or_else(|| RestError::Empty(TABLE.to_string()).into())
    }

    async fn update(&self, id: AccountId, patch: &AccountPatch) -> AppResult<Option<Account>> {
        let query = Query::new().eq("id", id);
        let rows: Vec<AccountRow> = self.client.update(TABLE, &query, patch).await?;
        Ok(rows.into_iter().next().map(map_account))
    }

    async fn delete(&self, id: AccountId) -> AppResult<bool> {
        let removed = self.client.delete(TABLE, &Query::new().eq("id", id)).await?;
        Ok(removed > 0)
    }
}
