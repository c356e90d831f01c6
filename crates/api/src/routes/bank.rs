//! Bank connection and reconciliation routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use barrkeh_core::bank::{BankConnection, NewBankConnection, Reconciliation};
use barrkeh_shared::types::BankConnectionId;
use serde::Deserialize;

use crate::{AppState, error::ApiResult};

/// Creates the bank routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bank", get(list_connections).post(connect_bank))
        .route(
            "/bank/reconciliations",
            get(list_reconciliations).post(confirm_reconciliation),
        )
        .route("/bank/{connection_id}", delete(disconnect_bank))
        .route("/bank/{connection_id}/sync", post(sync_bank))
}

/// Request body for confirming a month as reconciled.
#[derive(Debug, Deserialize)]
pub struct ReconciliationRequest {
    /// Calendar year.
    pub year: i32,
    /// Month 1-12.
    pub month: u32,
}

/// GET `/bank`.
async fn list_connections(State(state): State<AppState>) -> Json<Vec<BankConnection>> {
    Json(state.book.snapshot().await.bank_connections.clone())
}

/// POST `/bank` - Store a connection with its cached accounts.
async fn connect_bank(
    State(state): State<AppState>,
    Json(input): Json<NewBankConnection>,
) -> ApiResult<impl IntoResponse> {
    let now = state.book.clock().now();
    let connection = state
        .book
        .write("connect_bank", |s| s.connect_bank(input, now))
        .await?;
    Ok((StatusCode::CREATED, Json(connection)))
}

/// POST `/bank/{connection_id}/sync`.
async fn sync_bank(
    State(state): State<AppState>,
    Path(connection_id): Path<BankConnectionId>,
) -> ApiResult<Json<BankConnection>> {
    let now = state.book.clock().now();
    let connection = state
        .book
        .write("sync_bank", |s| s.sync_bank(connection_id, now))
        .await?;
    Ok(Json(connection))
}

/// DELETE `/bank/{connection_id}`.
async fn disconnect_bank(
    State(state): State<AppState>,
    Path(connection_id): Path<BankConnectionId>,
) -> ApiResult<StatusCode> {
    state
        .book
        .write("disconnect_bank", |s| s.disconnect_bank(connection_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/bank/reconciliations`.
async fn list_reconciliations(State(state): State<AppState>) -> Json<Vec<Reconciliation>> {
    Json(state.book.snapshot().await.reconciliations.clone())
}

/// POST `/bank/reconciliations` - Confirm a month against the bank.
async fn confirm_reconciliation(
    State(state): State<AppState>,
    Json(body): Json<ReconciliationRequest>,
) -> ApiResult<Json<Reconciliation>> {
    let now = state.book.clock().now();
    let reconciliation = state
        .book
        .write("confirm_reconciliation", |s| {
            s.confirm_reconciliation(body.year, body.month, now)
        })
        .await?;
    Ok(Json(reconciliation))
}
