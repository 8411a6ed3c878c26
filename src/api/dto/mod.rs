//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `entry` - Ledger entry view, also the cached representation
//! - `audit_log` - Audit record listing
//! - `error` - Common error response DTOs
//! - `health` - Health check DTOs

mod audit_log;
mod entry;
mod error;
mod health;

pub use audit_log::{AuditLogQuery, AuditLogResponse};
pub use entry::{DeleteEntryResponse, EntryView};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthChecks, HealthResponse, HealthStatus};
