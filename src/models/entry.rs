//! Ledger entry models for database operations.

use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use jiff_diesel::Timestamp;
use serde::{Deserialize, Serialize};

/// Direction of a ledger posting
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, DbEnum, utoipa::ToSchema,
)]
#[db_enum(existing_type_path = "crate::schema::sql_types::EntryKind")]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Credit,
    Debit,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Credit => write!(f, "credit"),
            EntryKind::Debit => write!(f, "debit"),
        }
    }
}

/// Stored ledger entry
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Entry {
    pub id: i32,
    pub date_entry: Timestamp,
    pub description: String,
    pub amount: BigDecimal,
    pub kind: EntryKind,
    pub category: Option<String>,
}

/// Insertable form; the id is assigned by the store
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::entries)]
pub struct NewEntry {
    pub date_entry: Timestamp,
    pub description: String,
    pub amount: BigDecimal,
    pub kind: EntryKind,
    pub category: Option<String>,
}

/// Full replacement of an entry's mutable fields
///
/// A `None` category clears the stored value.
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::entries)]
#[diesel(treat_none_as_null = true)]
pub struct EntryChanges {
    pub date_entry: Timestamp,
    pub description: String,
    pub amount: BigDecimal,
    pub kind: EntryKind,
    pub category: Option<String>,
}

impl EntryChanges {
    /// Apply the changes to an entry held outside the database
    pub fn apply_to(self, entry: &mut Entry) {
        entry.date_entry = self.date_entry;
        entry.description = self.description;
        entry.amount = self.amount;
        entry.kind = self.kind;
        entry.category = self.category;
    }
}

impl NewEntry {
    pub fn into_entry(self, id: i32) -> Entry {
        Entry {
            id,
            date_entry: self.date_entry,
            description: self.description,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
        }
    }
}
