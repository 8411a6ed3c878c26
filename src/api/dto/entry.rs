//! Entry DTOs: the external shape of a ledger entry.

use bigdecimal::BigDecimal;
use jiff::Timestamp;
use jiff_diesel::ToDiesel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::cache::{CacheError, CacheValue};
use crate::error::{AppError, AppResult};
use crate::models::{Entry, EntryChanges, EntryKind, NewEntry};

/// View of a ledger entry, used for request and response bodies and as the cached value.
///
/// `id` is ignored on create; `date_entry` is always stamped by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[schema(example = json!({
    "id": 7,
    "date_entry": "2025-03-01T09:30:00Z",
    "description": "Office supplies",
    "amount": "42.90",
    "kind": "debit",
    "category": "office"
}))]
pub struct EntryView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub date_entry: Option<Timestamp>,
    #[validate(length(min = 1, max = 255, message = "Description must be between 1 and 255 characters"))]
    #[schema(min_length = 1, max_length = 255)]
    pub description: String,
    #[validate(custom(function = "validate_amount"))]
    #[schema(value_type = String, example = "42.90")]
    pub amount: BigDecimal,
    pub kind: EntryKind,
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,
}

fn validate_amount(amount: &BigDecimal) -> Result<(), ValidationError> {
    if *amount < BigDecimal::from(0) {
        return Err(ValidationError::new("amount")
            .with_message("Amount must not be negative".into()));
    }
    Ok(())
}

impl EntryView {
    /// Insertable form. A missing timestamp is stamped with the current time.
    pub fn into_new_entry(self) -> NewEntry {
        NewEntry {
            date_entry: self.date_entry.unwrap_or_else(Timestamp::now).to_diesel(),
            description: self.description,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
        }
    }

    /// Target id and replacement fields for an update.
    pub fn into_changes(self) -> AppResult<(i32, EntryChanges)> {
        let id = self.id.ok_or_else(|| AppError::Validation {
            field: "id".to_string(),
            reason: "An entry id is required for updates".to_string(),
        })?;
        let changes = EntryChanges {
            date_entry: self.date_entry.unwrap_or_else(Timestamp::now).to_diesel(),
            description: self.description,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
        };
        Ok((id, changes))
    }
}

impl From<Entry> for EntryView {
    fn from(entry: Entry) -> Self {
        Self {
            id: Some(entry.id),
            date_entry: Some(entry.date_entry.to_jiff()),
            description: entry.description,
            amount: entry.amount,
            kind: entry.kind,
            category: entry.category,
        }
    }
}

impl CacheValue for EntryView {
    fn to_cache_value(&self) -> Result<String, CacheError> {
        Ok(serde_json::to_string(self)?)
    }

    fn from_cache_value(raw: &str) -> Result<Self, CacheError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Outcome of a delete: number of rows removed (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteEntryResponse {
    pub affected: usize,
}
