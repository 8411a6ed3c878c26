//! Failure type returned across the entry service boundary.

use serde::Serialize;
use thiserror::Error;

use crate::error::AppError;

/// Discriminant of a [`ServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceErrorKind {
    NotFound,
    Exception,
}

/// Structured failure of a service operation: a kind plus the message text.
///
/// `NotFound` is produced when the store reports no record for a requested
/// id. Everything else (store faults, connection faults, mapping faults)
/// is an `Exception` carrying the full message of the underlying error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Exception { message: String },
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound {
            message: message.into(),
        }
    }

    pub fn exception(message: impl Into<String>) -> Self {
        ServiceError::Exception {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            ServiceError::NotFound { .. } => ServiceErrorKind::NotFound,
            ServiceError::Exception { .. } => ServiceErrorKind::Exception,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ServiceError::NotFound { message } | ServiceError::Exception { message } => message,
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::NotFound { .. } => ServiceError::not_found(error.to_string()),
            other => ServiceError::exception(other.chain_message()),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_not_found_maps_to_not_found_kind() {
        let error: ServiceError = AppError::NotFound {
            entity: "entry".to_string(),
            field: "id".to_string(),
            value: "7".to_string(),
        }
        .into();
        assert_eq!(error.kind(), ServiceErrorKind::NotFound);
        assert_eq!(error.message(), "Resource not found: entry with id=7");
    }

    #[test]
    fn test_database_error_maps_to_exception_with_cause() {
        let error: ServiceError = AppError::Database {
            operation: "update entry".to_string(),
            source: anyhow::anyhow!("deadlock detected"),
        }
        .into();
        assert_eq!(error.kind(), ServiceErrorKind::Exception);
        assert!(error.message().contains("deadlock detected"));
    }

    #[test]
    fn test_display_is_message() {
        let error = ServiceError::exception("boom");
        assert_eq!(error.to_string(), "boom");
    }
}
