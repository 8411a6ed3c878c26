//! Conversion of application and service errors into HTTP responses.
//!
//! Infrastructure details (SQL errors, pool failures, cache faults) are logged
//! but never echoed back to the client. A service `Exception` keeps its full
//! message in the audit record and the log; the response carries a generic one.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::{AppError, ServiceError};

/// Maps an AppError variant to its HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. }
        | AppError::ValidationErrors { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Database { .. }
        | AppError::Configuration { .. }
        | AppError::Cache { .. }
        | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Cache { .. } => "CACHE_ERROR",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

fn error_body(error: &AppError) -> ErrorResponse {
    let code = error_to_code(error);
    match error {
        AppError::NotFound {
            entity,
            field,
            value,
        }
        | AppError::Duplicate {
            entity,
            field,
            value,
        } => ErrorResponse::new(code, &error.to_string()).with_details(json!({
            "entity": entity,
            "field": field,
            "value": value,
        })),
        AppError::Validation { field, reason } => ErrorResponse::new(code, &error.to_string())
            .with_details(json!({ "field": field, "reason": reason })),
        AppError::ValidationErrors { errors } => {
            ErrorResponse::new(code, &error.to_string()).with_details(json!({ "errors": errors }))
        }
        AppError::BadRequest { message } => ErrorResponse::new(code, message),
        AppError::Database { operation, .. } => ErrorResponse::new(
            code,
            &format!("Database operation failed: {}", operation),
        ),
        AppError::Configuration { key, .. } => {
            ErrorResponse::new(code, &format!("Configuration error: {}", key))
        }
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new(code, "Database connection unavailable")
        }
        AppError::Cache { .. } | AppError::Internal { .. } => {
            ErrorResponse::new(code, "An internal error occurred")
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = %self.chain_message(), "Request failed");
        }
        (status, Json(error_body(&self))).into_response()
    }
}

/// Maps a ServiceError to its HTTP status code.
pub fn service_error_status(error: &ServiceError) -> StatusCode {
    match error {
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Exception { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message returned to clients for a service `Exception`.
pub const EXCEPTION_MESSAGE: &str = "The operation could not be completed";

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = service_error_status(&self);
        let body = match &self {
            ServiceError::NotFound { message } => ErrorResponse::new("NOT_FOUND", message),
            ServiceError::Exception { message } => {
                tracing::error!(error = %message, "Entry operation raised an exception");
                ErrorResponse::new("EXCEPTION", EXCEPTION_MESSAGE)
            }
        };
        (status, Json(body)).into_response()
    }
}
