//! Audit trail request handlers.

use axum::{Json, Router, extract::State, routing::get};

use crate::api::doc::AUDIT_TAG;
use crate::api::dto::{AuditLogQuery, AuditLogResponse, ErrorResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::validate::ValidatedQuery;

pub fn audit_log_routes() -> Router<AppState> {
    Router::new().route("/", get(list_audit_logs))
}

/// Most recent audit records, newest first.
#[utoipa::path(
    get,
    path = "/api/audit-logs",
    params(AuditLogQuery),
    responses(
        (status = 200, description = "Recent audit records", body = Vec<AuditLogResponse>),
        (status = 400, description = "Invalid limit", body = ErrorResponse)
    ),
    tag = AUDIT_TAG
)]
pub async fn list_audit_logs(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AuditLogQuery>,
) -> Result<Json<Vec<AuditLogResponse>>, AppError> {
    let records = state.services.audit_logs.list_recent(query.limit).await?;
    Ok(Json(
        records.into_iter().map(AuditLogResponse::from).collect(),
    ))
}
