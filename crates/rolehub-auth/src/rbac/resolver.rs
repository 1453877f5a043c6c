//! Permission lookup and maintenance for (role, module) pairs.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use rolehub_core::error::AppError;
use rolehub_core::result::AppResult;
use rolehub_core::types::RoleId;
use rolehub_entity::{Module, Permission, PermissionFlags, PermissionGrant};
use rolehub_store::PermissionStore;

/// Resolves and maintains permissions. Nothing is cached; every call reads
/// the store.
#[derive(Debug, Clone)]
pub struct PermissionResolver {
    store: Arc<dyn PermissionStore>,
}

impl PermissionResolver {
    /// Create a new resolver.
    pub fn new(store: Arc<dyn PermissionStore>) -> Self {
        Self { store }
    }

    /// The permission of a role on a module. `None` is an implicit deny.
    pub async fn resolve(&self, role_id: RoleId, module: Module) -> AppResult<Option<Permission>> {
        self.store.find(role_id, module).await
    }

    /// Every permission of a role, sorted by module name.
    pub async fn resolve_all(&self, role_id: RoleId) -> AppResult<Vec<Permission>> {
        let mut permissions = self.store.list_by_role(role_id).await?;
        permissions.sort_by(|a, b| a.module.as_str().cmp(b.module.as_str()));
        Ok(permissions)
    }

    /// Insert or overwrite one permission.
    pub async fn upsert(&self, grant: PermissionGrant) -> AppResult<Permission> {
        let mut saved = self.upsert_many(&[grant]).await?;
        saved
            .pop()
            .ok_or_else(|| AppError::upstream("Store returned no row for the permission upsert"))
    }

    /// Insert or overwrite several permissions. Last write wins per
    /// (role, module); an empty input does not reach the store.
    pub async fn upsert_many(&self, grants: &[PermissionGrant]) -> AppResult<Vec<Permission>> {
        if grants.is_empty() {
            return Ok(Vec::new());
        }
        let deduped = dedupe_last_wins(grants);
        let saved = self.store.upsert_many(&deduped).await?;
        info!(count = saved.len(), "Permissions upserted");
        Ok(saved)
    }

    /// Replace the listed modules' permissions of one role.
    pub async fn set_many_for_role(
        &self,
        role_id: RoleId,
        by_module: &BTreeMap<Module, PermissionFlags>,
    ) -> AppResult<Vec<Permission>> {
        let grants: Vec<PermissionGrant> = by_module
            .iter()
            .map(|(module, flags)| PermissionGrant::new(role_id, *module, *flags))
            .collect();
        self.upsert_many(&grants).await
    }

    /// Remove a permission. Removing an absent one succeeds.
    pub async fn remove(&self, role_id: RoleId, module: Module) -> AppResult<()> {
        self.store.delete(role_id, module).await?;
        info!(rol_id = %role_id, modulo = %module, "Permission removed");
        Ok(())
    }
}

/// A batch upsert may not touch the same row twice, so keep the last
/// grant per (role, module) in first-seen order.
fn dedupe_last_wins(grants: &[PermissionGrant]) -> Vec<PermissionGrant> {
    let mut out: Vec<PermissionGrant> = Vec::with_capacity(grants.len());
    for grant in grants {
        match out
            .iter_mut()
            .find(|g| g.role_id == grant.role_id && g.module == grant.module)
        {
            Some(existing) => existing.flags = grant.flags,
            None => out.push(*grant),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rolehub_store::memory::MemoryStore;

    use super::*;

    /// Counts batch writes reaching the store.
    #[derive(Debug, Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl PermissionStore for CountingStore {
        async fn list_by_role(&self, role_id: RoleId) -> AppResult<Vec<Permission>> {
            self.inner.list_by_role(role_id).await
        }
        async fn find(&self, role_id: RoleId, module: Module) -> AppResult<Option<Permission>> {
            self.inner.find(role_id, module).await
        }
        async fn upsert_many(&self, grants: &[PermissionGrant]) -> AppResult<Vec<Permission>> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.upsert_many(grants).await
        }
        async fn delete(&self, role_id: RoleId, module: Module) -> AppResult<()> {
            PermissionStore::delete(&self.inner, role_id, module).await
        }
    }

    fn read_only() -> PermissionFlags {
        PermissionFlags {
            puede_get: true,
            ..PermissionFlags::default()
        }
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let resolver = PermissionResolver::new(Arc::new(MemoryStore::new()));
        let role_id = RoleId::new();
        let grant = PermissionGrant::new(role_id, Module::Productos, read_only());

        let first = resolver.upsert(grant).await.unwrap();
        let second = resolver.upsert(grant).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(resolver.resolve_all(role_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let resolver = PermissionResolver::new(Arc::new(MemoryStore::new()));
        let role_id = RoleId::new();
        let saved = resolver
            .upsert_many(&[
                PermissionGrant::new(role_id, Module::Ventas, read_only()),
                PermissionGrant::new(role_id, Module::Ventas, PermissionFlags::all()),
            ])
            .await
            .unwrap();
        assert_eq!(saved.len(), 1);
        let stored = resolver
            .resolve(role_id, Module::Ventas)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.flags, PermissionFlags::all());
    }

    #[tokio::test]
    async fn test_empty_batch_skips_store() {
        let store = Arc::new(CountingStore::default());
        let resolver = PermissionResolver::new(store.clone());
        assert!(resolver.upsert_many(&[]).await.unwrap().is_empty());
        assert!(
            resolver
                .set_many_for_role(RoleId::new(), &BTreeMap::new())
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_set_many_and_sorted_listing() {
        let resolver = PermissionResolver::new(Arc::new(MemoryStore::new()));
        let role_id = RoleId::new();
        let mut map = BTreeMap::new();
        map.insert(Module::Ventas, read_only());
        map.insert(Module::Compras, PermissionFlags::all());
        map.insert(Module::Usuarios, read_only());
        resolver.set_many_for_role(role_id, &map).await.unwrap();

        let modules: Vec<&str> = resolver
            .resolve_all(role_id)
            .await
            .unwrap()
            .iter()
            .map(|p| p.module.as_str())
            .collect();
        assert_eq!(modules, vec!["COMPRAS", "USUARIOS", "VENTAS"]);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let resolver = PermissionResolver::new(Arc::new(MemoryStore::new()));
        let role_id = RoleId::new();
        resolver
            .upsert(PermissionGrant::new(role_id, Module::Marcas, read_only()))
            .await
            .unwrap();
        resolver.remove(role_id, Module::Marcas).await.unwrap();
        resolver.remove(role_id, Module::Marcas).await.unwrap();
        assert!(resolver.resolve(role_id, Module::Marcas).await.unwrap().is_none());
    }
}
