use crate::cache::CacheError;
use crate::config::error::ConfigError;
use crate::error::convert_diesel_error;
use serde::Serialize;
use thiserror::Error;

/// A single field failure reported by request validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Application-wide error type for the infrastructure layers.
///
/// Repositories, the cache layer and configuration loading report failures
/// through this type. The entry service converts it into a `ServiceError`
/// at its boundary.
#[derive(Error, Debug)]
pub enum AppError {
    /// No row matched; becomes `ServiceError::NotFound` at the service boundary
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Unique constraint hit on insert or update
    #[error("{entity}.{field} '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// One field rejected by the store or by a domain rule
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Request body or query rejected by `validator`
    #[error("Validation failed on {} field(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Query failure; `operation` names what was being attempted
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid configuration at {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// No pooled database connection within the checkout timeout
    #[error("No database connection available")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Cache refused a write the caller depends on, e.g. invalidation after a store write
    #[error("Cache error")]
    Cache {
        #[from]
        source: CacheError,
    },

    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Wraps a connection pool checkout failure.
    pub fn pool<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }

    /// Renders the error together with every source in its chain.
    ///
    /// `Display` on the top-level variant alone hides the underlying cause
    /// (e.g. the SQL error behind `Database`), so audit records use this.
    pub fn chain_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        convert_diesel_error(error, "database operation")
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = error.field().unwrap_or("settings").to_string();
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, failures)| {
                failures.iter().map(move |failure| ValidationFieldError {
                    field: field.to_string(),
                    message: failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| failure.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors: fields }
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
