use diesel::prelude::*;
use jiff_diesel::Timestamp;

/// One recorded operation attempt
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::audit_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditLog {
    pub id: i64,
    pub actor: String,
    pub component: String,
    pub operation: String,
    /// Empty on success, the error message on failure
    pub detail: String,
    pub created_at: Timestamp,
}

/// NewAuditLog model for inserting new records; `created_at` defaults in the database
#[derive(Debug, Insertable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::audit_logs)]
pub struct NewAuditLog {
    pub actor: String,
    pub component: String,
    pub operation: String,
    pub detail: String,
}
