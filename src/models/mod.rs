mod audit_log;
mod entry;

pub use audit_log::{AuditLog, NewAuditLog};
pub use entry::{Entry, EntryChanges, EntryKind, NewEntry};
