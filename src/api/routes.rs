//! Router configuration for the API.

use axum::{Router, middleware};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Routes
/// - `/api/entries` - Ledger entries
/// - `/api/audit-logs` - Audit trail
/// - `/health`, `/health/ready`, `/health/live` - Health checks
/// - `/swagger-ui` - API documentation
///
/// Middleware runs in reverse order of declaration, so the request ID is
/// set before the logging middleware reads it.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest("/entries", handlers::entries::entry_routes())
        .nest("/audit-logs", handlers::audit_logs::audit_log_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(handlers::health::health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
