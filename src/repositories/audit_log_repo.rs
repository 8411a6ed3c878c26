//! Audit log repository.
//!
//! Audit records are append-only; the store exposes insert and a newest-first listing.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use jiff_diesel::ToDiesel;
use tokio::sync::RwLock;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{AuditLog, NewAuditLog};

#[async_trait]
pub trait AuditLogStore: Send + Sync {
    async fn insert(&self, record: NewAuditLog) -> AppResult<AuditLog>;

    /// Most recent records first, at most `limit` of them
    async fn list_recent(&self, limit: i64) -> AppResult<Vec<AuditLog>>;
}

/// PostgreSQL-backed audit log store
#[derive(Clone)]
pub struct AuditLogRepository {
    pool: AsyncDbPool,
}

impl AuditLogRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogStore for AuditLogRepository {
    async fn insert(&self, record: NewAuditLog) -> AppResult<AuditLog> {
        use crate::schema::audit_logs::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        diesel::insert_into(audit_logs)
            .values(&record)
            .returning(AuditLog::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn list_recent(&self, limit: i64) -> AppResult<Vec<AuditLog>> {
        use crate::schema::audit_logs::dsl::*;
        let mut conn = self.pool.get().await.map_err(AppError::pool)?;

        audit_logs
            .order(id.desc())
            .limit(limit)
            .select(AuditLog::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}

/// Audit log store held in process memory
#[derive(Default)]
pub struct InMemoryAuditLogStore {
    rows: RwLock<Vec<AuditLog>>,
}

impl InMemoryAuditLogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditLogStore for InMemoryAuditLogStore {
    async fn insert(&self, record: NewAuditLog) -> AppResult<AuditLog> {
        let mut rows = self.rows.write().await;
        let log = AuditLog {
            id: rows.len() as i64 + 1,
            actor: record.actor,
            component: record.component,
            operation: record.operation,
            detail: record.detail,
            created_at: jiff::Timestamp::now().to_diesel(),
        };
        rows.push(log.clone());
        Ok(log)
    }

    async fn list_recent(&self, limit: i64) -> AppResult<Vec<AuditLog>> {
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let rows = self.rows.read().await;
        Ok(rows.iter().rev().take(limit).cloned().collect())
    }
}
