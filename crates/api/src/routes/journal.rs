//! Journal routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use barrkeh_core::ledger::{JournalEntry, JournalLineInput, NewJournalEntry};
use barrkeh_shared::types::JournalEntryId;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{AppState, error::ApiResult};

/// Creates the journal routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/journal", get(list_entries).post(post_entry))
        .route("/journal/{entry_id}/lock", post(lock_entry))
        .route("/journal/{entry_id}/lines", put(update_lines))
        .route("/journal/{entry_id}/reverse", post(reverse_entry))
}

/// Query for listing entries.
#[derive(Debug, Default, Deserialize)]
pub struct ListEntriesQuery {
    /// `date` sorts by accounting date; insertion order otherwise.
    #[serde(default)]
    pub sort: Option<String>,
}

/// Request body for replacing the lines of an entry.
#[derive(Debug, Deserialize)]
pub struct UpdateLinesRequest {
    /// Replacement lines.
    pub lines: Vec<JournalLineInput>,
}

/// Request body for reversing an entry.
#[derive(Debug, Deserialize)]
pub struct ReverseRequest {
    /// Date of the reversing entry; today when omitted.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Why the entry is reversed.
    pub reason: String,
}

/// GET `/journal` - Journal entries.
async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> Json<Vec<JournalEntry>> {
    let snapshot = state.book.snapshot().await;
    let entries: Vec<JournalEntry> = if query.sort.as_deref() == Some("date") {
        snapshot.entries_by_date().into_iter().cloned().collect()
    } else {
        snapshot.journal_entries.clone()
    };
    Json(entries)
}

/// POST `/journal` - Post a balanced entry.
async fn post_entry(
    State(state): State<AppState>,
    Json(input): Json<NewJournalEntry>,
) -> ApiResult<impl IntoResponse> {
    let entry = state.book.post_entry(input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// POST `/journal/{entry_id}/lock` - Lock an entry.
async fn lock_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<JournalEntryId>,
) -> ApiResult<Json<JournalEntry>> {
    let entry = state
        .book
        .write("lock_entry", |s| s.lock_entry(entry_id))
        .await?;
    Ok(Json(entry))
}

/// PUT `/journal/{entry_id}/lines` - Replace the lines of an unlocked entry.
async fn update_lines(
    State(state): State<AppState>,
    Path(entry_id): Path<JournalEntryId>,
    Json(body): Json<UpdateLinesRequest>,
) -> ApiResult<Json<JournalEntry>> {
    let entry = state
        .book
        .write("update_entry_lines", |s| s.update_entry_lines(entry_id, body.lines))
        .await?;
    Ok(Json(entry))
}

/// POST `/journal/{entry_id}/reverse` - Post the swapped-sides correction.
async fn reverse_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<JournalEntryId>,
    Json(body): Json<ReverseRequest>,
) -> ApiResult<impl IntoResponse> {
    let date = body.date.unwrap_or_else(|| state.book.today());
    let entry = state
        .book
        .write("reverse_entry", |s| s.reverse_entry(entry_id, date, &body.reason))
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
