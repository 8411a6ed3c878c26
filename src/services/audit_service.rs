//! Audit logging service.
//!
//! Records one row per operation attempt and serves the recent history.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{AuditLog, NewAuditLog};
use crate::repositories::AuditLogStore;

/// Upper bound for a single audit listing
pub const MAX_AUDIT_PAGE: i64 = 500;

/// Sink for operation audit records
#[async_trait]
pub trait AuditLogger: Send + Sync {
    /// Record an operation attempt. `detail` is empty on success.
    async fn add(&self, actor: &str, component: &str, operation: &str, detail: &str)
    -> AppResult<()>;
}

/// Audit logger persisting into an [`AuditLogStore`]
#[derive(Clone)]
pub struct AuditLogService {
    store: Arc<dyn AuditLogStore>,
}

impl AuditLogService {
    pub fn new(store: Arc<dyn AuditLogStore>) -> Self {
        Self { store }
    }

    /// Newest records first; `limit` is clamped to `1..=MAX_AUDIT_PAGE`.
    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<AuditLog>> {
        self.store.list_recent(limit.clamp(1, MAX_AUDIT_PAGE)).await
    }
}

#[async_trait]
impl AuditLogger for AuditLogService {
    async fn add(
        &self,
        actor: &str,
        component: &str,
        operation: &str,
        detail: &str,
    ) -> AppResult<()> {
        let record = self
            .store
            .insert(NewAuditLog {
                actor: actor.to_string(),
                component: component.to_string(),
                operation: operation.to_string(),
                detail: detail.to_string(),
            })
            .await?;

        tracing::debug!(
            audit_id = record.id,
            actor = %record.actor,
            operation = %record.operation,
            failed = !record.detail.is_empty(),
            "Audit record written"
        );
        Ok(())
    }
}
