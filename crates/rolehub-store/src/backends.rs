//! Bundle of every backend trait object the services need.

use std::sync::Arc;

use rolehub_core::config::store::StoreConfig;
use rolehub_core::result::AppResult;
use tracing::info;

use crate::identity::GoTrueIdentityProvider;
use crate::memory::{MemoryIdentityProvider, MemoryStore};
use crate::rest::{
    RestAccountStore, RestAssignmentStore, RestClient, RestPermissionStore, RestRoleStore,
};
use crate::traits::{
    AccountStore, IdentityProvider, PermissionStore, RoleAssignmentStore, RoleStore,
};

/// Store and identity handles, built once at startup.
#[derive(Debug, Clone)]
pub struct Backends {
    pub accounts: Arc<dyn AccountStore>,
    pub roles: Arc<dyn RoleStore>,
    pub permissions: Arc<dyn PermissionStore>,
    pub assignments: Arc<dyn RoleAssignmentStore>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl Backends {
    /// Connect to the hosted store described by the configuration.
    pub fn connect(config: &StoreConfig) -> AppResult<Self> {
        config.validate()?;
        let client = RestClient::from_config(config)?;
        let identity = GoTrueIdentityProvider::from_config(config)?;
        info!(
            url = %config.base_url(),
            privileged_key = config.service_role_key.is_some(),
            "Store clients configured"
        );
        Ok(Self {
            accounts: Arc::new(RestAccountStore::new(client.clone())),
            roles: Arc::new(RestRoleStore::new(client.clone())),
            permissions: Arc::new(RestPermissionStore::new(client.clone())),
            assignments: Arc::new(RestAssignmentStore::new(client)),
            identity: Arc::new(identity),
        })
    }

    /// Backends sharing one in-memory store and identity provider.
    pub fn in_memory(store: &MemoryStore, identity: &MemoryIdentityProvider) -> Self {
        Self {
            accounts: Arc::new(store.clone()),
            roles: Arc::new(store.clone()),
            permissions: Arc::new(store.clone()),
            assignments: Arc::new(store.clone()),
            identity: Arc::new(identity.clone()),
        }
    }
}
