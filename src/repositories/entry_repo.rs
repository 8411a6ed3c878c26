//! Entry repository for async database operations.
//!
//! `EntryStore` is the authoritative record of ledger entries. `EntryRepository`
//! backs it with PostgreSQL through diesel_async; `InMemoryEntryStore` keeps
//! entries in a process-local map.

use std::collections::BTreeMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tokio::sync::RwLock;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Entry, EntryChanges, NewEntry};

/// Persistent store for ledger entries
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Insert a new entry and return it with its assigned id
    async fn add(&self, new_entry: NewEntry) -> AppResult<Entry>;

    /// Replace the mutable fields of an existing entry
    ///
    /// Fails with `AppError::NotFound` when no entry has `id`.
    async fn update(&self, id: i32, changes: EntryChanges) -> AppResult<Entry>;

    /// Delete an entry, returning the number of affected rows (0 or 1)
    async fn delete(&self, id: i32) -> AppResult<usize>;

    async fn get_item(&self, id: i32) -> AppResult<Option<Entry>>;

    /// All entries ordered by id
    async fn get_all(&self) -> AppResult<Vec<Entry>>;
}

pub(crate) fn entry_not_found(id: i32) -> AppError {
    AppError::NotFound {
        entity: "entry".to_string(),
        field: "id".to_string(),
        value: id.to_string(),
    }
}

/// PostgreSQL-backed entry store.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct EntryRepository {
    pool: AsyncDbPool,
}

impl EntryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore for EntryRepository {
    async fn add(&self, new_entry: NewEntry) -> AppResult<Entry> {
        use crate::schema::entries::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        diesel::insert_into(entries)
            .values(&new_entry)
            .returning(Entry::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, entry_id: i32, changes: EntryChanges) -> AppResult<Entry> {
        use crate::schema::entries::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        diesel::update(entries.filter(id.eq(entry_id)))
            .set(&changes)
            .returning(Entry::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)?
            .ok_or_else(|| entry_not_found(entry_id))
    }

    async fn delete(&self, entry_id: i32) -> AppResult<usize> {
        use crate::schema::entries::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        diesel::delete(entries.filter(id.eq(entry_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn get_item(&self, entry_id: i32) -> AppResult<Option<Entry>> {
        use crate::schema::entries::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        entries
            .filter(id.eq(entry_id))
            .select(Entry::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn get_all(&self) -> AppResult<Vec<Entry>> {
        use crate::schema::entries::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        entries
            .order(id.asc())
            .select(Entry::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}

#[derive(Default)]
struct MemoryEntries {
    next_id: i32,
    rows: BTreeMap<i32, Entry>,
}

/// Entry store held in process memory
#[derive(Default)]
pub struct InMemoryEntryStore {
    inner: RwLock<MemoryEntries>,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn add(&self, new_entry: NewEntry) -> AppResult<Entry> {
        let mut inner = self.inner.write().await;
        inner.next_id = inner.next_id.checked_add(1).ok_or_else(|| AppError::Internal {
            source: anyhow::anyhow!("entry id space exhausted"),
        })?;
        let entry = new_entry.into_entry(inner.next_id);
        inner.rows.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn update(&self, id: i32, changes: EntryChanges) -> AppResult<Entry> {
        let mut inner = self.inner.write().await;
        let entry = inner.rows.get_mut(&id).ok_or_else(|| entry_not_found(id))?;
        changes.apply_to(entry);
        Ok(entry.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<usize> {
        let mut inner = self.inner.write().await;
        Ok(usize::from(inner.rows.remove(&id).is_some()))
    }

    async fn get_item(&self, id: i32) -> AppResult<Option<Entry>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn get_all(&self) -> AppResult<Vec<Entry>> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryKind;
    use bigdecimal::BigDecimal;
    use jiff_diesel::ToDiesel;
    use std::str::FromStr;

    fn new_entry(description: &str) -> NewEntry {
        NewEntry {
            date_entry: jiff::Timestamp::now().to_diesel(),
            description: description.to_string(),
            amount: BigDecimal::from_str("12.50").unwrap(),
            kind: EntryKind::Credit,
            category: None,
        }
    }

    fn changes(description: &str) -> EntryChanges {
        EntryChanges {
            date_entry: jiff::Timestamp::now().to_diesel(),
            description: description.to_string(),
            amount: BigDecimal::from_str("99.99").unwrap(),
            kind: EntryKind::Debit,
            category: Some("fees".to_string()),
        }
    }

    #[tokio::test]
    async fn test_add_assigns_increasing_ids() {
        let store = InMemoryEntryStore::new();
        let first = store.add(new_entry("a")).await.unwrap();
        let second = store.add(new_entry("b")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_get_all_is_ordered_by_id() {
        let store = InMemoryEntryStore::new();
        for name in ["a", "b", "c"] {
            store.add(new_entry(name)).await.unwrap();
        }
        let all = store.get_all().await.unwrap();
        let ids: Vec<i32> = all.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let store = InMemoryEntryStore::new();
        let created = store.add(new_entry("coffee")).await.unwrap();
        let updated = store.update(created.id, changes("tea")).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.description, "tea");
        assert_eq!(updated.kind, EntryKind::Debit);
        let stored = store.get_item(created.id).await.unwrap().unwrap();
        assert_eq!(stored.category.as_deref(), Some("fees"));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = InMemoryEntryStore::new();
        let err = store.update(41, changes("x")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { ref value, .. } if value == "41"));
    }

    #[tokio::test]
    async fn test_delete_reports_affected_rows() {
        let store = InMemoryEntryStore::new();
        let created = store.add(new_entry("a")).await.unwrap();
        assert_eq!(store.delete(created.id).await.unwrap(), 1);
        assert_eq!(store.delete(created.id).await.unwrap(), 0);
        assert!(store.get_item(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = InMemoryEntryStore::new();
        let first = store.add(new_entry("a")).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.add(new_entry("b")).await.unwrap();
        assert_eq!(second.id, 2);
    }
}
