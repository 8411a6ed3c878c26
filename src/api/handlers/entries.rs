//! Ledger entry request handlers.
//!
//! Every handler passes the `x-actor` caller through to the entry service,
//! which audits the call.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::api::doc::ENTRY_TAG;
use crate::api::dto::{DeleteEntryResponse, EntryView, ErrorResponse};
use crate::api::middleware::Actor;
use crate::error::ServiceError;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Routes:
/// - GET /        - List all entries
/// - POST /       - Create an entry
/// - GET /{id}    - Get entry by ID
/// - PUT /{id}    - Replace entry by ID
/// - DELETE /{id} - Delete entry by ID
pub fn entry_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route(
            "/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

#[utoipa::path(
    get,
    path = "/api/entries",
    params(("x-actor" = Option<String>, Header, description = "Caller recorded in the audit log")),
    responses(
        (status = 200, description = "All entries", body = Vec<EntryView>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = ENTRY_TAG
)]
pub async fn list_entries(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<Json<Vec<EntryView>>, ServiceError> {
    let entries = state.services.entries.get_all(actor.as_str()).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/api/entries/{id}",
    params(
        ("id" = i32, Path, description = "Entry id"),
        ("x-actor" = Option<String>, Header, description = "Caller recorded in the audit log")
    ),
    responses(
        (status = 200, description = "Entry found", body = EntryView),
        (status = 404, description = "No entry with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = ENTRY_TAG
)]
pub async fn get_entry(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<i32>,
) -> Result<Json<EntryView>, ServiceError> {
    let entry = state.services.entries.get_item(actor.as_str(), id).await?;
    Ok(Json(entry))
}

/// The body's `id` is ignored and `date_entry` is set by the server.
#[utoipa::path(
    post,
    path = "/api/entries",
    params(("x-actor" = Option<String>, Header, description = "Caller recorded in the audit log")),
    request_body = EntryView,
    responses(
        (status = 201, description = "Entry created", body = EntryView),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = ENTRY_TAG
)]
pub async fn create_entry(
    State(state): State<AppState>,
    actor: Actor,
    ValidatedJson(payload): ValidatedJson<EntryView>,
) -> Result<(StatusCode, Json<EntryView>), ServiceError> {
    let entry = state
        .services
        .entries
        .add_entry(actor.as_str(), payload)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// The path id wins over any `id` in the body.
#[utoipa::path(
    put,
    path = "/api/entries/{id}",
    params(
        ("id" = i32, Path, description = "Entry id"),
        ("x-actor" = Option<String>, Header, description = "Caller recorded in the audit log")
    ),
    request_body = EntryView,
    responses(
        (status = 200, description = "Entry updated", body = EntryView),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "No entry with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = ENTRY_TAG
)]
pub async fn update_entry(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<i32>,
    ValidatedJson(mut payload): ValidatedJson<EntryView>,
) -> Result<Json<EntryView>, ServiceError> {
    payload.id = Some(id);
    let entry = state
        .services
        .entries
        .update_entry(actor.as_str(), payload)
        .await?;
    Ok(Json(entry))
}

/// Deleting an absent id succeeds with `affected = 0`.
#[utoipa::path(
    delete,
    path = "/api/entries/{id}",
    params(
        ("id" = i32, Path, description = "Entry id"),
        ("x-actor" = Option<String>, Header, description = "Caller recorded in the audit log")
    ),
    responses(
        (status = 200, description = "Rows removed", body = DeleteEntryResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    tag = ENTRY_TAG
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<i32>,
) -> Result<Json<DeleteEntryResponse>, ServiceError> {
    let affected = state
        .services
        .entries
        .delete_entry(actor.as_str(), id)
        .await?;
    Ok(Json(DeleteEntryResponse { affected }))
}
