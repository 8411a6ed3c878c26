//! Health check endpoint handlers.
//!
//! The store is checked with `SELECT 1` when PostgreSQL backs it; the cache
//! with a read of a reserved key. A failing cache only degrades the service,
//! since every operation falls back to the store.

use std::time::Instant;

use axum::{Router, extract::State, http::StatusCode, response::Json, routing::get};

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthChecks, HealthResponse, HealthStatus};
use crate::state::AppState;

const CACHE_CHECK_KEY: &str = "__health__";

/// Routes:
/// - `GET /health` - Component health
/// - `GET /health/ready` - Readiness check
/// - `GET /health/live` - Liveness check
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .route("/health/live", get(liveness_check))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy or degraded", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let checks = HealthChecks {
        store: check_store(&state).await,
        cache: check_cache(&state).await,
    };
    let response = HealthResponse::new(
        crate::pkg_version(),
        jiff::Timestamp::now().to_string(),
        checks,
    );
    (response.status.http_status(), Json(response))
}

/// Ready once the store answers.
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match check_store(&state).await.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded | HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[utoipa::path(
    get,
    path = "/health/live",
    responses(
        (status = 200, description = "Service is alive")
    ),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

fn component(status: HealthStatus, message: impl Into<String>, start: Instant) -> ComponentHealth {
    ComponentHealth::new(status, message, start.elapsed())
}

async fn check_store(state: &AppState) -> ComponentHealth {
    let start = Instant::now();
    let Some(pool) = state.db_pool.as_ref() else {
        return component(
            HealthStatus::Healthy,
            format!("{} store", state.store_backend.as_str()),
            start,
        );
    };

    match pool.get().await {
        Ok(mut conn) => {
            use diesel_async::RunQueryDsl;

            match diesel::sql_query("SELECT 1").execute(&mut conn).await {
                Ok(_) => component(HealthStatus::Healthy, "Connected", start),
                Err(e) => component(HealthStatus::Unhealthy, format!("Query failed: {}", e), start),
            }
        }
        Err(e) => component(
            HealthStatus::Unhealthy,
            format!("Connection failed: {}", e),
            start,
        ),
    }
}

async fn check_cache(state: &AppState) -> ComponentHealth {
    let start = Instant::now();
    let backend = state.cache.backend_name();
    if !state.cache.is_enabled() {
        return component(HealthStatus::Healthy, backend, start);
    }

    match state.cache.backend().get(CACHE_CHECK_KEY).await {
        Ok(_) => component(HealthStatus::Healthy, backend, start),
        Err(e) => component(
            HealthStatus::Degraded,
            format!("{} unreachable: {}", backend, e),
            start,
        ),
    }
}
