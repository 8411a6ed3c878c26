//! Cache-aside orchestration of ledger entry operations.
//!
//! Reads go to the cache first and fall back to the store; writes go to the
//! store and then refresh the cache. Every public operation writes exactly
//! one audit record: empty detail on success, the error message on failure.
//!
//! A cache read that errors or holds an undecodable value counts as a miss.
//! After a store write the cached view must be gone or replaced: if the cache
//! refuses the removal (or the overwrite) the operation fails with the cache
//! error, since a stale view would otherwise keep being served. Filling the
//! cache after a read, or after a successful removal, is best effort.

use std::sync::Arc;

use jiff::Timestamp;

use crate::api::dto::EntryView;
use crate::cache::{AppCache, CacheValue, UpdateCachePolicy, entry_key};
use crate::error::{AppError, AppResult, ServiceResult};
use crate::repositories::{EntryStore, entry_not_found};
use crate::services::AuditLogger;

/// Component name recorded in audit logs
pub const COMPONENT: &str = "EntryService";

/// Audited operation names
pub mod operation {
    pub const ADD_ENTRY: &str = "AddEntry";
    pub const UPDATE_ENTRY: &str = "UpdateEntry";
    pub const GET_ITEM: &str = "GetItem";
    pub const GET_ALL: &str = "GetAll";
    pub const DELETE_ENTRY: &str = "DeleteEntry";
}

#[derive(Clone)]
pub struct EntryService {
    store: Arc<dyn EntryStore>,
    cache: Arc<dyn AppCache>,
    audit: Arc<dyn AuditLogger>,
    update_policy: UpdateCachePolicy,
}

impl EntryService {
    pub fn new(
        store: Arc<dyn EntryStore>,
        cache: Arc<dyn AppCache>,
        audit: Arc<dyn AuditLogger>,
        update_policy: UpdateCachePolicy,
    ) -> Self {
        Self {
            store,
            cache,
            audit,
            update_policy,
        }
    }

    /// Stamp the current time, insert and return the stored view.
    ///
    /// The cache is not populated; the first read fills it.
    pub async fn add_entry(&self, actor: &str, view: EntryView) -> ServiceResult<EntryView> {
        let result = self.try_add(view).await;
        self.audited(actor, operation::ADD_ENTRY, result).await
    }

    /// Stamp the current time, update the store, then refresh the cached view.
    pub async fn update_entry(&self, actor: &str, view: EntryView) -> ServiceResult<EntryView> {
        let result = self.try_update(view).await;
        self.audited(actor, operation::UPDATE_ENTRY, result).await
    }

    /// Cached view if present, otherwise the stored entry, which is then cached.
    pub async fn get_item(&self, actor: &str, id: i32) -> ServiceResult<EntryView> {
        let result = self.try_get_item(id).await;
        self.audited(actor, operation::GET_ITEM, result).await
    }

    /// Every stored entry. Always read from the store.
    pub async fn get_all(&self, actor: &str) -> ServiceResult<Vec<EntryView>> {
        let result = self.try_get_all().await;
        self.audited(actor, operation::GET_ALL, result).await
    }

    /// Delete from the store, then drop the cached view. Returns affected rows.
    pub async fn delete_entry(&self, actor: &str, id: i32) -> ServiceResult<usize> {
        let result = self.try_delete(id).await;
        self.audited(actor, operation::DELETE_ENTRY, result).await
    }

    async fn try_add(&self, mut view: EntryView) -> ServiceResult<EntryView> {
        view.date_entry = Some(Timestamp::now());
        let created = self.store.add(view.into_new_entry()).await?;
        Ok(EntryView::from(created))
    }

    async fn try_update(&self, mut view: EntryView) -> ServiceResult<EntryView> {
        view.date_entry = Some(Timestamp::now());
        let (id, changes) = view.into_changes()?;
        let updated = EntryView::from(self.store.update(id, changes).await?);
        self.refresh_cached(&entry_key(id), &updated).await?;
        Ok(updated)
    }

    async fn try_get_item(&self, id: i32) -> ServiceResult<EntryView> {
        let key = entry_key(id);
        if let Some(view) = self.cached_view(&key).await {
            tracing::debug!(id, "Entry served from cache");
            return Ok(view);
        }

        let entry = self
            .store
            .get_item(id)
            .await?
            .ok_or_else(|| entry_not_found(id))?;
        let view = EntryView::from(entry);
        self.fill_cache(&key, &view).await;
        Ok(view)
    }

    async fn try_get_all(&self) -> ServiceResult<Vec<EntryView>> {
        let entries = self.store.get_all().await?;
        Ok(entries.into_iter().map(EntryView::from).collect())
    }

    async fn try_delete(&self, id: i32) -> ServiceResult<usize> {
        let affected = self.store.delete(id).await?;
        self.invalidate(&entry_key(id)).await?;
        Ok(affected)
    }

    async fn audited<T>(
        &self,
        actor: &str,
        operation: &str,
        result: ServiceResult<T>,
    ) -> ServiceResult<T> {
        let detail = match &result {
            Ok(_) => "",
            Err(err) => err.message(),
        };
        if let Err(err) = &result {
            tracing::warn!(actor, operation, kind = ?err.kind(), error = %err, "Entry operation failed");
        }
        if let Err(audit_err) = self.audit.add(actor, COMPONENT, operation, detail).await {
            tracing::error!(
                actor,
                operation,
                error = %audit_err.chain_message(),
                "Failed to write audit record"
            );
        }
        result
    }

    async fn cached_view(&self, key: &str) -> Option<EntryView> {
        let raw = match self.cache.get(key).await {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(err) => {
                tracing::warn!(key, error = %err, "Cache read failed, falling back to store");
                return None;
            }
        };
        match EntryView::from_cache_value(&raw) {
            Ok(view) => Some(view),
            Err(err) => {
                tracing::warn!(key, error = %err, "Cached entry is undecodable, falling back to store");
                None
            }
        }
    }

    async fn refresh_cached(&self, key: &str, view: &EntryView) -> AppResult<()> {
        match self.update_policy {
            UpdateCachePolicy::RemoveThenSet => {
                self.invalidate(key).await?;
                self.fill_cache(key, view).await;
                Ok(())
            }
            UpdateCachePolicy::Overwrite => self.overwrite(key, view).await,
            UpdateCachePolicy::Invalidate => self.invalidate(key).await,
        }
    }

    /// Replace the cached view; an unencodable view is removed instead.
    async fn overwrite(&self, key: &str, view: &EntryView) -> AppResult<()> {
        let value = match view.to_cache_value() {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "Entry could not be encoded for the cache");
                return self.invalidate(key).await;
            }
        };
        self.cache.set(key, value).await.map_err(|err| {
            tracing::warn!(key, error = %err, "Cache overwrite failed, cached entry may be stale");
            AppError::from(err)
        })
    }

    async fn invalidate(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await.map_err(|err| {
            tracing::warn!(key, error = %err, "Cache removal failed, cached entry may be stale");
            AppError::from(err)
        })
    }

    /// Best-effort write of a view the store just returned.
    async fn fill_cache(&self, key: &str, view: &EntryView) {
        let value = match view.to_cache_value() {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "Entry could not be encoded for the cache");
                return;
            }
        };
        if let Err(err) = self.cache.set(key, value).await {
            tracing::warn!(key, error = %err, "Cache write failed");
        }
    }
}
