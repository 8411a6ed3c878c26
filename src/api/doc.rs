use utoipa::OpenApi;

pub const ENTRY_TAG: &str = "Entries";
pub const AUDIT_TAG: &str = "Audit";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ledger",
        description = "Ledger entries with a cache-aside read path and an audit trail",
    ),
    paths(
        crate::api::handlers::entries::list_entries,
        crate::api::handlers::entries::get_entry,
        crate::api::handlers::entries::create_entry,
        crate::api::handlers::entries::update_entry,
        crate::api::handlers::entries::delete_entry,
        crate::api::handlers::audit_logs::list_audit_logs,
        crate::api::handlers::health::health_check,
        crate::api::handlers::health::readiness_check,
        crate::api::handlers::health::liveness_check,
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::models::EntryKind,
        )
    ),
    tags(
        (name = ENTRY_TAG, description = "Ledger entry endpoints"),
        (name = AUDIT_TAG, description = "Audit trail endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
