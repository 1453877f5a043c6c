//! In-memory tables guarded by a Tokio mutex.
//!
//! Enforces the same unique keys as the hosted store: account email and
//! subject, role name, one assignment per account and one permission per
//! (role, module).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use rolehub_core::error::AppError;
use rolehub_core::result::AppResult;
use rolehub_core::types::{
    AccountId, AssignmentId, AuthUserId, Page, PermissionId, RoleId,
};
use rolehub_entity::{
    Account, AccountPatch, AccountWithRole, Module, NewAccount, NewRole, Permission,
    PermissionGrant, Role, RoleAssignment, RoleName, RolePatch,
};

use crate::traits::{AccountStore, ListFilter, PermissionStore, RoleAssignmentStore, RoleStore};

#[derive(Debug, Default)]
struct Tables {
    /// Rows in insertion order.
    accounts: Vec<Account>,
    roles: Vec<Role>,
    permissions: Vec<Permission>,
    assignments: Vec<RoleAssignment>,
}

impl Tables {
    fn with_role(&self, account: &Account) -> AccountWithRole {
        let assignment = self
            .assignments
            .iter()
            .find(|a| a.account_id == account.id);
        let rol_id = assignment.map(|a| a.role_id);
        let rol_nombre = rol_id.and_then(|id| {
            self.roles
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.name)
        });
        AccountWithRole {
            account: account.clone(),
            rol_id,
            rol_nombre,
        }
    }

    fn email_taken(&self, email: &str, except: Option<AccountId>) -> bool {
        self.accounts
            .iter()
            .any(|a| a.email == email && Some(a.id) != except)
    }

    fn subject_taken(&self, subject: AuthUserId) -> bool {
        self.accounts
            .iter()
            .any(|a| a.auth_user_id == Some(subject))
    }

    fn role_name_taken(&self, name: RoleName, except: Option<RoleId>) -> bool {
        self.roles
            .iter()
            .any(|r| r.name == name && Some(r.id) != except)
    }
}

/// Every table of the store, held in process. Cheap to clone; clones share
/// state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn unique_violation(constraint: &str) -> AppError {
    AppError::conflict(format!(
        "duplicate key value violates unique constraint \"{constraint}\""
    ))
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Newest first; ties keep the most recent insertion first.
fn newest_first<T: Clone>(rows: &[T], created: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by_key(|row| std::cmp::Reverse(created(row)));
    out
}

fn paginate<T>(rows: Vec<T>, filter: &ListFilter) -> Page<T> {
    let total = rows.len() as u64;
    let data = rows
        .into_iter()
        .skip(usize::try_from(filter.page.offset()).unwrap_or(usize::MAX))
        .take(filter.page.limit as usize)
        .collect();
    Page::new(data, filter.page, total)
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn list(&self, filter: &ListFilter) -> AppResult<Page<AccountWithRole>> {
        let tables = self.tables.lock().await;
        let term = filter.search_term().map(str::to_lowercase);
        let matching: Vec<Account> = newest_first(&tables.accounts, |a| a.created_at)
            .into_iter()
            .filter(|a| filter.active.is_none_or(|active| a.active == active))
            .filter(|a| {
                term.as_deref().is_none_or(|t| {
                    contains_ci(&a.name, t) || contains_ci(&a.surname, t) || contains_ci(&a.email, t)
                })
            })
            .collect();
        let joined = matching.iter().map(|a| tables.with_role(a)).collect();
        Ok(paginate(joined, filter))
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<AccountWithRole>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .accounts
            .iter()
            .find(|a| a.id == id)
            .map(|a| tables.with_role(a)))
    }

    async fn find_by_auth_user(&self, subject: AuthUserId) -> AppResult<Option<Account>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .accounts
            .iter()
            .find(|a| a.auth_user_id == Some(subject))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let tables = self.tables.lock().await;
        Ok(tables.accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn insert(&self, account: &NewAccount) -> AppResult<Account> {
        let mut tables = self.tables.lock().await;
        if tables.email_taken(&account.email, None) {
            return Err(unique_violation("usuarios_email_key"));
        }
        if tables.subject_taken(account.auth_user_id) {
            return Err(unique_violation("usuarios_auth_user_id_key"));
        }
        let row = Account {
            id: AccountId::new(),
            name: account.name.clone(),
            surname: account.surname.clone(),
            email: account.email.clone(),
            phone: account.phone.clone(),
            address: account.address.clone(),
            active: account.active,
            created_at: Utc::now(),
            auth_user_id: Some(account.auth_user_id),
        };
        tables.accounts.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: AccountId, patch: &AccountPatch) -> AppResult<Option<Account>> {
        let mut tables = self.tables.lock().await;
        if let Some(email) = &patch.email {
            if tables.email_taken(email, Some(id)) {
                return Err(unique_violation("usuarios_email_key"));
            }
        }
        let Some(row) = tables.accounts.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            row.name = name.clone();
        }
        if let Some(surname) = &patch.surname {
            row.surname = surname.clone();
        }
        if let Some(email) = &patch.email {
            row.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            row.phone = phone.clone();
        }
        if let Some(address) = &patch.address {
            row.address = address.clone();
        }
        if let Some(active) = patch.active {
            row.active = active;
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: AccountId) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.accounts.len();
        tables.accounts.retain(|a| a.id != id);
        Ok(tables.accounts.len() < before)
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn list(&self, filter: &ListFilter) -> AppResult<Page<Role>> {
        let tables = self.tables.lock().await;
        let term = filter.search_term().map(str::to_lowercase);
        let matching: Vec<Role> = newest_first(&tables.roles, |r| r.created_at)
            .into_iter()
            .filter(|r| filter.active.is_none_or(|active| r.active == active))
            .filter(|r| term.as_deref().is_none_or(|t| contains_ci(r.name.as_str(), t)))
            .collect();
        Ok(paginate(matching, filter))
    }

    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>> {
        let tables = self.tables.lock().await;
        Ok(tables.roles.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_name(&self, name: RoleName) -> AppResult<Option<Role>> {
        let tables = self.tables.lock().await;
        Ok(tables.roles.iter().find(|r| r.name == name).cloned())
    }

    async fn insert(&self, role: &NewRole) -> AppResult<Role> {
        let mut tables = self.tables.lock().await;
        if tables.role_name_taken(role.name, None) {
            return Err(unique_violation("roles_nombre_key"));
        }
        let row = Role {
            id: RoleId::new(),
            name: role.name,
            description: role.description.clone(),
            active: role.active,
            created_at: Utc::now(),
        };
        tables.roles.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: RoleId, patch: &RolePatch) -> AppResult<Option<Role>> {
        let mut tables = self.tables.lock().await;
        if let Some(name) = patch.name {
            if tables.role_name_taken(name, Some(id)) {
                return Err(unique_violation("roles_nombre_key"));
            }
        }
        let Some(row) = tables.roles.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(description) = &patch.description {
            row.description = description.clone();
        }
        if let Some(active) = patch.active {
            row.active = active;
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: RoleId) -> AppResult<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.roles.len();
        tables.roles.retain(|r| r.id != id);
        Ok(tables.roles.len() < before)
    }
}

#[async_trait]
impl PermissionStore for MemoryStore {
    async fn list_by_role(&self, role_id: RoleId) -> AppResult<Vec<Permission>> {
        let tables = self.tables.lock().await;
        let mut rows: Vec<Permission> = tables
            .permissions
            .iter()
            .filter(|p| p.role_id == role_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.module.as_str().cmp(b.module.as_str()));
        Ok(rows)
    }

    async fn find(&self, role_id: RoleId, module: Module) -> AppResult<Option<Permission>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .permissions
            .iter()
            .find(|p| p.role_id == role_id && p.module == module)
            .cloned())
    }

    async fn upsert_many(&self, grants: &[PermissionGrant]) -> AppResult<Vec<Permission>> {
        let mut tables = self.tables.lock().await;
        let mut saved = Vec::with_capacity(grants.len());
        for grant in grants {
            let existing = tables
                .permissions
                .iter()
                .position(|p| p.role_id == grant.role_id && p.module == grant.module);
            let row = match existing {
                Some(index) => {
                    tables.permissions[index].flags = grant.flags;
                    tables.permissions[index].clone()
                }
                None => {
                    let row = Permission {
                        id: PermissionId::new(),
                        role_id: grant.role_id,
                        module: grant.module,
                        flags: grant.flags,
                    };
                    tables.permissions.push(row.clone());
                    row
                }
            };
            saved.push(row);
        }
        Ok(saved)
    }

    async fn delete(&self, role_id: RoleId, module: Module) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        tables
            .permissions
            .retain(|p| !(p.role_id == role_id && p.module == module));
        Ok(())
    }
}

#[async_trait]
impl RoleAssignmentStore for MemoryStore {
    async fn find_by_account(&self, account_id: AccountId) -> AppResult<Option<RoleAssignment>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .assignments
            .iter()
            .find(|a| a.account_id == account_id)
            .cloned())
    }

    async fn upsert(&self, account_id: AccountId, role_id: RoleId) -> AppResult<RoleAssignment> {
        let mut tables = self.tables.lock().await;
        if let Some(row) = tables
            .assignments
            .iter_mut()
            .find(|a| a.account_id == account_id)
        {
            row.role_id = role_id;
            return Ok(row.clone());
        }
        let row = RoleAssignment {
            id: AssignmentId::new(),
            account_id,
            role_id,
            created_at: Utc::now(),
        };
        tables.assignments.push(row.clone());
        Ok(row)
    }

    async fn delete_by_account(&self, account_id: AccountId) -> AppResult<()> {
        let mut tables = self.tables.lock().await;
        tables.assignments.retain(|a| a.account_id != account_id);
        Ok(())
    }

    async fn count_by_role(&self, role_id: RoleId) -> AppResult<u64> {
        let tables = self.tables.lock().await;
        Ok(tables
            .assignments
            .iter()
            .filter(|a| a.role_id == role_id)
            .count() as u64)
    }
}
