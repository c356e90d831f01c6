//! Cash-basis transaction routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use barrkeh_core::transactions::{NewTransaction, Transaction, TransactionPatch};
use barrkeh_shared::types::TransactionId;

use crate::{AppState, error::ApiResult};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(record_transaction))
        .route(
            "/transactions/{transaction_id}",
            patch(update_transaction).delete(delete_transaction),
        )
}

/// GET `/transactions`.
async fn list_transactions(State(state): State<AppState>) -> Json<Vec<Transaction>> {
    Json(state.book.snapshot().await.transactions.clone())
}

/// POST `/transactions` - Record income or an expense.
async fn record_transaction(
    State(state): State<AppState>,
    Json(input): Json<NewTransaction>,
) -> ApiResult<impl IntoResponse> {
    let now = state.book.clock().now();
    let transaction = state
        .book
        .write("record_transaction", |s| s.record_transaction(input, now))
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// PATCH `/transactions/{transaction_id}`.
async fn update_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
    Json(patch): Json<TransactionPatch>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state
        .book
        .write("update_transaction", |s| {
            s.update_transaction(transaction_id, patch)
        })
        .await?;
    Ok(Json(transaction))
}

/// DELETE `/transactions/{transaction_id}`.
async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> ApiResult<StatusCode> {
    state
        .book
        .write("delete_transaction", |s| s.delete_transaction(transaction_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
