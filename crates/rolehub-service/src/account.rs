//! Account management, including the identity-backed create, update and
//! delete flows.

use std::sync::Arc;

use tracing::{error, info};

use rolehub_core::error::{AppError, ErrorKind};
use rolehub_core::result::AppResult;
use rolehub_core::types::{AccountId, Page};
use rolehub_entity::account::{normalize_email, normalize_optional, normalize_phone, normalize_text};
use rolehub_entity::{Account, AccountPatch, AccountWithRole, NewAccount};
use rolehub_store::{AccountStore, IdentityProvider, ListFilter, RoleAssignmentStore};

use crate::saga::Saga;

const EMAIL_TAKEN: &str = "Ya existe un usuario con ese email.";
const NOT_FOUND: &str = "Usuario no encontrado.";
const EMPTY_PATCH: &str = "No hay campos para actualizar.";

/// Input for account creation.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub password: String,
}

/// Partial account update. `address: Some(None)` clears the address.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Option<String>>,
    pub active: Option<bool>,
}

impl UpdateAccountInput {
    fn into_patch(self) -> AccountPatch {
        AccountPatch {
            name: self.name.as_deref().map(normalize_text),
            surname: self.surname.as_deref().map(normalize_text),
            email: self.email.as_deref().map(normalize_email),
            phone: self.phone.as_deref().map(normalize_phone),
            address: self.address.map(|a| normalize_optional(a.as_deref())),
            active: self.active,
        }
    }
}

/// Account CRUD backed by the store and the identity provider.
#[derive(Debug, Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
    assignments: Arc<dyn RoleAssignmentStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl AccountService {
    /// Create a new account service.
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        assignments: Arc<dyn RoleAssignmentStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            accounts,
            assignments,
            identity,
        }
    }

    /// List accounts with their role.
    pub async fn list(&self, filter: &ListFilter) -> AppResult<Page<AccountWithRole>> {
        self.accounts.list(filter).await
    }

    /// Get one account with its role.
    pub async fn get(&self, id: AccountId) -> AppResult<AccountWithRole> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))
    }

    /// Create the provider identity, then the account row. If the row
    /// cannot be written the identity is deleted again.
    pub async fn create(&self, input: CreateAccountInput) -> AppResult<Account> {
        let email = normalize_email(&input.email);
        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }

        let mut saga = Saga::new("create_account");

        let identity_user = saga
            .step(
                "create identity",
                self.identity.create_user(&email, &input.password),
            )
            .await
            .map_err(email_conflict)?;

        let identity = self.identity.clone();
        let subject = identity_user.id;
        saga.register_compensation("delete identity", move || async move {
            identity.delete_user(subject).await
        });

        let new = NewAccount::new(
            &input.name,
            &input.surname,
            &email,
            &input.phone,
            input.address.as_deref(),
            subject,
        );
        let account = saga
            .step("insert account", self.accounts.insert(&new))
            .await
            .map_err(email_conflict)?;
        saga.complete();

        info!(user_id = %account.id, auth_user_id = %subject, "Account created");
        Ok(account)
    }

    /// Apply a partial update. An email change is mirrored to the provider
    /// first and reverted there if the row update fails.
    pub async fn update(&self, id: AccountId, input: UpdateAccountInput) -> AppResult<Account> {
        let patch = input.into_patch();
        if patch.is_empty() {
            return Err(AppError::validation(EMPTY_PATCH));
        }

        let mut saga = Saga::new("update_account");

        if let Some(new_email) = patch.email.clone() {
            let current = self.get(id).await?.account;
            if new_email != current.email {
                if let Some(other) = self.accounts.find_by_email(&new_email).await? {
                    if other.id != id {
                        return Err(AppError::conflict(EMAIL_TAKEN));
                    }
                }
                if let Some(subject) = current.auth_user_id {
                    saga.step(
                        "update identity email",
                        self.identity.update_email(subject, &new_email),
                    )
                    .await
                    .map_err(email_conflict)?;

                    let identity = self.identity.clone();
                    let old_email = current.email.clone();
                    saga.register_compensation("restore identity email", move || async move {
                        identity.update_email(subject, &old_email).await
                    });
                }
            }
        }

        let accounts = self.accounts.clone();
        let account = saga
            .step("update account", async {
                accounts
                    .update(id, &patch)
                    .await?
                    .ok_or_else(|| AppError::not_found(NOT_FOUND))
            })
            .await
            .map_err(email_conflict)?;
        saga.complete();

        info!(user_id = %id, "Account updated");
        Ok(account)
    }

    /// Activate or deactivate an account.
    pub async fn set_active(&self, id: AccountId, active: bool) -> AppResult<Account> {
        let account = self
            .accounts
            .update(id, &AccountPatch::active(active))
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
        info!(user_id = %id, estado = active, "Account status changed");
        Ok(account)
    }

    /// Delete the assignment, the account row and the provider identity, in
    /// that order. Nothing is rolled back once the row is gone.
    pub async fn delete(&self, id: AccountId) -> AppResult<()> {
        let account = self.get(id).await?.account;

        self.assignments.delete_by_account(id).await?;
        self.accounts.delete(id).await?;

        if let Some(subject) = account.auth_user_id {
            if let Err(err) = self.identity.delete_user(subject).await {
                error!(
                    user_id = %id,
                    auth_user_id = %subject,
                    error = %err,
                    "Account row deleted but identity deletion failed"
                );
                return Err(err);
            }
        }

        info!(user_id = %id, "Account deleted");
        Ok(())
    }
}

/// Report a uniqueness failure from the store or provider with the same
/// message as the pre-check.
fn email_conflict(err: AppError) -> AppError {
    if err.is(ErrorKind::Conflict) {
        AppError::conflict(EMAIL_TAKEN)
    } else {
        err
    }
}
