//! Liveness and book status.

use axum::{Json, Router, extract::State, routing::get};
use barrkeh_core::STATE_VERSION;
use chrono::NaiveDate;
use serde::Serialize;

use crate::AppState;

/// Liveness plus the shape of the loaded book.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always `healthy` when the handler answers.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Blob layout version this build reads and writes.
    pub state_version: u32,
    /// Current lock date of the loaded book.
    pub lock_date: Option<NaiveDate>,
    /// Journal entries in the loaded book.
    pub journal_entries: usize,
}

/// GET `/health`
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.book.snapshot().await;
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        state_version: STATE_VERSION,
        lock_date: snapshot.fiscal_settings.lock_date,
        journal_entries: snapshot.journal_entries.len(),
    })
}

/// Creates the health routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
