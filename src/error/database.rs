//! Translation of diesel errors into `AppError`.
//!
//! PostgreSQL reports the table, column and constraint behind a violation as
//! separate fields, which diesel exposes through `DatabaseErrorInformation`.
//! Only the offending key and value of a unique violation have to be read
//! from the DETAIL line.

use std::sync::LazyLock;

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use regex::Regex;

use crate::error::AppError;

/// `Key (field)=(value) already exists.`
static DETAIL_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("valid key pattern"));

pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
    match error {
        DieselError::DatabaseError(kind, info) => convert_violation(kind, info.as_ref())
            .unwrap_or_else(|| AppError::Database {
                operation: operation.to_string(),
                source: anyhow::anyhow!("{}", info.message()),
            }),
        DieselError::NotFound => AppError::NotFound {
            entity: "row".to_string(),
            field: "id".to_string(),
            value: "unknown".to_string(),
        },
        other => AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::from(other),
        },
    }
}

fn convert_violation(
    kind: DatabaseErrorKind,
    info: &(dyn DatabaseErrorInformation + Send + Sync),
) -> Option<AppError> {
    let entity = info.table_name()?.to_string();
    match kind {
        DatabaseErrorKind::UniqueViolation => {
            let caps = DETAIL_KEY.captures(info.details()?)?;
            Some(AppError::Duplicate {
                entity,
                field: caps[1].to_string(),
                value: caps[2].to_string(),
            })
        }
        DatabaseErrorKind::NotNullViolation => Some(AppError::Validation {
            field: info.column_name()?.to_string(),
            reason: format!("a value is required for {}", entity),
        }),
        DatabaseErrorKind::CheckViolation => {
            let constraint = info.constraint_name()?;
            Some(AppError::Validation {
                field: checked_column(&entity, constraint).to_string(),
                reason: format!("rejected by constraint {}", constraint),
            })
        }
        _ => None,
    }
}

/// `entries_amount_check` on `entries` checks `amount`. Constraints named
/// otherwise are reported under their own name.
fn checked_column<'a>(table: &str, constraint: &'a str) -> &'a str {
    constraint
        .strip_prefix(table)
        .and_then(|rest| rest.strip_prefix('_'))
        .and_then(|rest| rest.strip_suffix("_check"))
        .filter(|column| !column.is_empty())
        .unwrap_or(constraint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct PgErrorInfo {
        message: &'static str,
        details: Option<&'static str>,
        table: Option<&'static str>,
        column: Option<&'static str>,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for PgErrorInfo {
        fn message(&self) -> &str {
            self.message
        }

        fn details(&self) -> Option<&str> {
            self.details
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            self.table
        }

        fn column_name(&self) -> Option<&str> {
            self.column
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn convert(kind: DatabaseErrorKind, info: PgErrorInfo) -> AppError {
        convert_diesel_error(DieselError::DatabaseError(kind, Box::new(info)), "insert entry")
    }

    #[test]
    fn test_negative_amount_is_validation_on_amount() {
        let error = convert(
            DatabaseErrorKind::CheckViolation,
            PgErrorInfo {
                message: "new row for relation \"entries\" violates check constraint \"entries_amount_check\"",
                table: Some("entries"),
                constraint: Some("entries_amount_check"),
                ..Default::default()
            },
        );
        match error {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "amount");
                assert!(reason.contains("entries_amount_check"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_missing_description_names_column() {
        let error = convert(
            DatabaseErrorKind::NotNullViolation,
            PgErrorInfo {
                message: "null value in column \"description\" violates not-null constraint",
                table: Some("entries"),
                column: Some("description"),
                ..Default::default()
            },
        );
        assert!(matches!(error, AppError::Validation { ref field, .. } if field == "description"));
    }

    #[test]
    fn test_duplicate_key_reads_detail_line() {
        let error = convert(
            DatabaseErrorKind::UniqueViolation,
            PgErrorInfo {
                message: "duplicate key value violates unique constraint \"entries_pkey\"",
                details: Some("Key (id)=(42) already exists."),
                table: Some("entries"),
                constraint: Some("entries_pkey"),
                ..Default::default()
            },
        );
        match error {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!((entity.as_str(), field.as_str(), value.as_str()), ("entries", "id", "42"));
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_violation_without_table_is_database_error() {
        let error = convert(
            DatabaseErrorKind::UniqueViolation,
            PgErrorInfo {
                message: "something odd",
                ..Default::default()
            },
        );
        match error {
            AppError::Database { operation, source } => {
                assert_eq!(operation, "insert entry");
                assert_eq!(source.to_string(), "something odd");
            }
            other => panic!("Expected Database error, got: {:?}", other),
        }
    }

    #[test]
    fn test_checked_column_falls_back_to_constraint_name() {
        assert_eq!(checked_column("entries", "entries_amount_check"), "amount");
        assert_eq!(checked_column("entries", "positive_amount"), "positive_amount");
    }
}
