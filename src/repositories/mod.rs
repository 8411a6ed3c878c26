//! Repository layer for data access operations.
//!
//! Each store is a trait with a PostgreSQL repository and an in-memory
//! implementation; `Repositories` picks one set according to `store.backend`.

mod audit_log_repo;
mod entry_repo;

pub use audit_log_repo::{AuditLogRepository, AuditLogStore, InMemoryAuditLogStore};
pub use entry_repo::{EntryRepository, EntryStore, InMemoryEntryStore};
pub(crate) use entry_repo::entry_not_found;

use std::sync::Arc;

use crate::db::AsyncDbPool;

/// Aggregates all stores for convenient access.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Repositories {
    pub entries: Arc<dyn EntryStore>,
    pub audit_logs: Arc<dyn AuditLogStore>,
}

impl Repositories {
    /// Stores backed by the PostgreSQL pool
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            entries: Arc::new(EntryRepository::new(pool.clone())),
            audit_logs: Arc::new(AuditLogRepository::new(pool)),
        }
    }

    /// Process-local stores, empty on every start
    pub fn in_memory() -> Self {
        Self {
            entries: Arc::new(InMemoryEntryStore::new()),
            audit_logs: Arc::new(InMemoryAuditLogStore::new()),
        }
    }
}
