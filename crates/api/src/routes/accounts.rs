//! Chart of accounts routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use barrkeh_core::accounts::{Account, AccountPatch, NewAccount};
use barrkeh_core::ledger::{AccountBalance, TrialBalance, account_balances, trial_balance};
use barrkeh_shared::types::AccountId;

use crate::{AppState, error::ApiResult};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/balances", get(list_balances))
        .route("/accounts/trial-balance", get(get_trial_balance))
        .route("/accounts/{account_id}", patch(update_account))
}

/// GET `/accounts` - Chart of accounts in registry order.
async fn list_accounts(State(state): State<AppState>) -> Json<Vec<Account>> {
    Json(state.book.snapshot().await.chart_of_accounts.clone())
}

/// POST `/accounts` - Add an account.
async fn create_account(
    State(state): State<AppState>,
    Json(input): Json<NewAccount>,
) -> ApiResult<impl IntoResponse> {
    let account = state
        .book
        .write("add_account", |s| s.add_account(input))
        .await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// PATCH `/accounts/{account_id}` - Merge changes into an account.
async fn update_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Json(patch): Json<AccountPatch>,
) -> ApiResult<Json<Account>> {
    let id = AccountId::new(account_id);
    let account = state
        .book
        .write("update_account", |s| s.update_account(&id, patch))
        .await?;
    Ok(Json(account))
}

/// GET `/accounts/balances` - Per-account totals from the journal.
async fn list_balances(State(state): State<AppState>) -> Json<Vec<AccountBalance>> {
    let snapshot = state.book.snapshot().await;
    Json(account_balances(
        &snapshot.journal_entries,
        &snapshot.chart_of_accounts,
    ))
}

/// GET `/accounts/trial-balance`.
async fn get_trial_balance(State(state): State<AppState>) -> Json<TrialBalance> {
    let snapshot = state.book.snapshot().await;
    Json(trial_balance(
        &snapshot.journal_entries,
        &snapshot.chart_of_accounts,
    ))
}
