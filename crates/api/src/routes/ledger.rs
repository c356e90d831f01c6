//! Debtor/creditor ledger routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use barrkeh_core::subledger::{LedgerEntry, LedgerEntryPatch, LedgerSummary, NewLedgerEntry};
use barrkeh_shared::types::LedgerEntryId;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{AppState, error::ApiResult};

/// Creates the ledger routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ledger", get(list_entries).post(create_entry))
        .route("/ledger/summary", get(get_summary))
        .route(
            "/ledger/{entry_id}",
            patch(update_entry).delete(delete_entry),
        )
        .route("/ledger/{entry_id}/movements", post(record_movement))
        .route("/ledger/{entry_id}/settle", post(settle_entry))
}

/// Request body for a balance movement.
#[derive(Debug, Deserialize)]
pub struct MovementRequest {
    /// Signed change to the outstanding balance.
    pub amount: Decimal,
    /// Free-text memo.
    #[serde(default)]
    pub memo: Option<String>,
}

/// Request body for settling an entry.
#[derive(Debug, Default, Deserialize)]
pub struct SettleRequest {
    /// Free-text memo.
    #[serde(default)]
    pub memo: Option<String>,
}

/// GET `/ledger` - All debtor and creditor rows.
async fn list_entries(State(state): State<AppState>) -> Json<Vec<LedgerEntry>> {
    Json(state.book.snapshot().await.ledger_entries.clone())
}

/// POST `/ledger` - Open a debtor or creditor row.
async fn create_entry(
    State(state): State<AppState>,
    Json(input): Json<NewLedgerEntry>,
) -> ApiResult<impl IntoResponse> {
    let now = state.book.clock().now();
    let entry = state
        .book
        .write("add_ledger_entry", |s| s.add_ledger_entry(input, now))
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PATCH `/ledger/{entry_id}` - Contact-level changes.
async fn update_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<LedgerEntryId>,
    Json(patch): Json<LedgerEntryPatch>,
) -> ApiResult<Json<LedgerEntry>> {
    let now = state.book.clock().now();
    let entry = state
        .book
        .write("update_ledger_entry", |s| {
            s.update_ledger_entry(entry_id, patch, now)
        })
        .await?;
    Ok(Json(entry))
}

/// DELETE `/ledger/{entry_id}`.
async fn delete_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<LedgerEntryId>,
) -> ApiResult<StatusCode> {
    state
        .book
        .write("delete_ledger_entry", |s| s.delete_ledger_entry(entry_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/ledger/{entry_id}/movements` - Record a signed adjustment.
async fn record_movement(
    State(state): State<AppState>,
    Path(entry_id): Path<LedgerEntryId>,
    Json(body): Json<MovementRequest>,
) -> ApiResult<Json<LedgerEntry>> {
    let now = state.book.clock().now();
    let entry = state
        .book
        .write("record_movement", |s| {
            s.record_movement(entry_id, body.amount, body.memo, now)
        })
        .await?;
    Ok(Json(entry))
}

/// POST `/ledger/{entry_id}/settle` - Bring the balance to zero.
async fn settle_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<LedgerEntryId>,
    Json(body): Json<SettleRequest>,
) -> ApiResult<Json<LedgerEntry>> {
    let now = state.book.clock().now();
    let entry = state
        .book
        .write("settle_ledger_entry", |s| {
            s.settle_ledger_entry(entry_id, body.memo, now)
        })
        .await?;
    Ok(Json(entry))
}

/// GET `/ledger/summary` - Outstanding totals and the next due payment.
async fn get_summary(State(state): State<AppState>) -> Json<LedgerSummary> {
    let snapshot = state.book.snapshot().await;
    Json(LedgerSummary::compute(
        &snapshot.ledger_entries,
        &snapshot.invoices,
        state.book.today(),
    ))
}
