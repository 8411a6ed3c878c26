//! Audit log DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::AuditLog;

fn default_limit() -> i64 {
    50
}

/// Query parameters for listing audit records.
#[derive(Debug, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct AuditLogQuery {
    /// Maximum number of records, newest first (1-500)
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 500, message = "Limit must be between 1 and 500"))]
    #[param(minimum = 1, maximum = 500, default = 50)]
    pub limit: i64,
}

/// One recorded operation attempt.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuditLogResponse {
    pub id: i64,
    pub actor: String,
    pub component: String,
    pub operation: String,
    /// Empty when the operation succeeded
    pub detail: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
}

impl From<AuditLog> for AuditLogResponse {
    fn from(log: AuditLog) -> Self {
        Self {
            id: log.id,
            actor: log.actor,
            component: log.component,
            operation: log.operation,
            detail: log.detail,
            created_at: log.created_at.to_jiff(),
        }
    }
}
