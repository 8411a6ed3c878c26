//! Health report returned by `GET /health`.

use std::time::Duration;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Component or overall status, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Serving from the store with the cache unavailable
    Degraded,
    /// The store cannot be reached
    Unhealthy,
}

impl HealthStatus {
    /// 503 only when unhealthy; a degraded service still answers requests.
    pub fn http_status(self) -> StatusCode {
        match self {
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
            HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "message": "Connected",
    "response_time_ms": 2
}))]
pub struct ComponentHealth {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub response_time_ms: Option<u64>,
}

impl ComponentHealth {
    pub fn new(status: HealthStatus, message: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            status,
            message: Some(message.into()),
            response_time_ms: Some(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)),
        }
    }
}

/// Check results for the two backends the entry service depends on
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthChecks {
    pub store: ComponentHealth,
    pub cache: ComponentHealth,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "degraded",
    "version": "0.1.0",
    "timestamp": "2025-01-01T12:00:00Z",
    "checks": {
        "store": { "status": "healthy", "message": "Connected", "response_time_ms": 2 },
        "cache": { "status": "degraded", "message": "redis unreachable: Cache connection failed: refused", "response_time_ms": 5 }
    }
}))]
pub struct HealthResponse {
    /// Worst status among `checks`
    pub status: HealthStatus,
    pub version: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: String,
    pub checks: HealthChecks,
}

impl HealthResponse {
    pub fn new(version: impl Into<String>, timestamp: impl Into<String>, checks: HealthChecks) -> Self {
        Self {
            status: checks.store.status.max(checks.cache.status),
            version: version.into(),
            timestamp: timestamp.into(),
            checks,
        }
    }
}
