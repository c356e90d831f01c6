//! Whole-state export and import.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;

use crate::{AppState, error::ApiResult};

/// Creates the store routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/store/export", get(export_state))
        .route("/store/import", post(import_state))
}

/// Counts of the imported records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    /// Blob layout version.
    pub version: u32,
    /// Journal entries.
    pub journal_entries: usize,
    /// Invoices.
    pub invoices: usize,
    /// Cash-basis transactions.
    pub transactions: usize,
}

/// GET `/store/export` - The persisted blob.
async fn export_state(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let bytes = state.book.export_blob().await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], bytes))
}

/// POST `/store/import` - Replace the whole state with a blob.
async fn import_state(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ImportResponse>> {
    let imported = state.book.import_blob(&body).await?;
    Ok(Json(ImportResponse {
        version: imported.version,
        journal_entries: imported.journal_entries.len(),
        invoices: imported.invoices.len(),
        transactions: imported.transactions.len(),
    }))
}
