//! Service layer for business logic operations.
//!
//! Services coordinate the stores, the cache and the audit trail; handlers
//! only translate HTTP to service calls.

mod audit_service;
mod entry_service;

pub use audit_service::{AuditLogService, AuditLogger, MAX_AUDIT_PAGE};
pub use entry_service::{COMPONENT, EntryService, operation};

use std::sync::Arc;

use crate::cache::CacheManager;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Services {
    pub entries: EntryService,
    pub audit_logs: AuditLogService,
}

impl Services {
    /// Wire services over the given stores and cache.
    pub fn new(repos: Repositories, cache: &CacheManager) -> Self {
        let audit_logs = AuditLogService::new(repos.audit_logs);
        let entries = EntryService::new(
            repos.entries,
            cache.backend(),
            Arc::new(audit_logs.clone()),
            cache.update_policy(),
        );
        Self {
            entries,
            audit_logs,
        }
    }
}
