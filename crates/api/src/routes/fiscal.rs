//! Fiscal settings and period lock routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};
use barrkeh_core::fiscal::{FiscalSettings, FiscalSettingsPatch, PeriodState};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiResult};

/// Creates the fiscal routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fiscal/settings", get(get_settings).patch(update_settings))
        .route("/fiscal/lock", post(lock_period))
        .route("/fiscal/unlock", post(unlock_period))
        .route("/fiscal/period-state", get(get_period_state))
}

/// Request body for closing periods.
#[derive(Debug, Deserialize)]
pub struct LockRequest {
    /// Last day of the closed range.
    pub date: NaiveDate,
}

/// Request body for reopening periods.
#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    /// Why the books are reopened.
    pub reason: String,
}

/// Outcome of a lock.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockResponse {
    /// New lock date.
    pub lock_date: NaiveDate,
    /// Journal entries locked by this close.
    pub locked_entries: usize,
}

/// Outcome of an unlock.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockResponse {
    /// Lock date that was cleared.
    pub previous_lock_date: NaiveDate,
}

/// Query for the period state of a date.
#[derive(Debug, Deserialize)]
pub struct PeriodStateQuery {
    /// Date to check.
    pub date: NaiveDate,
}

/// Period state of a date.
#[derive(Debug, Serialize)]
pub struct PeriodStateResponse {
    /// Date checked.
    pub date: NaiveDate,
    /// `open` or `locked`.
    pub state: PeriodState,
}

/// GET `/fiscal/settings`.
async fn get_settings(State(state): State<AppState>) -> Json<FiscalSettings> {
    Json(state.book.snapshot().await.fiscal_settings.clone())
}

/// PATCH `/fiscal/settings`.
async fn update_settings(
    State(state): State<AppState>,
    Json(patch): Json<FiscalSettingsPatch>,
) -> ApiResult<Json<FiscalSettings>> {
    let settings = state
        .book
        .write("update_fiscal_settings", |s| s.update_fiscal_settings(patch))
        .await?;
    Ok(Json(settings))
}

/// POST `/fiscal/lock` - Close every period through `date`.
async fn lock_period(
    State(state): State<AppState>,
    Json(body): Json<LockRequest>,
) -> ApiResult<Json<LockResponse>> {
    let locked_entries = state.book.lock_period(body.date).await?;
    Ok(Json(LockResponse {
        lock_date: body.date,
        locked_entries,
    }))
}

/// POST `/fiscal/unlock` - Reopen closed periods.
async fn unlock_period(
    State(state): State<AppState>,
    Json(body): Json<UnlockRequest>,
) -> ApiResult<Json<UnlockResponse>> {
    let previous_lock_date = state.book.unlock_period(&body.reason).await?;
    Ok(Json(UnlockResponse { previous_lock_date }))
}

/// GET `/fiscal/period-state?date=`.
async fn get_period_state(
    State(state): State<AppState>,
    Query(query): Query<PeriodStateQuery>,
) -> Json<PeriodStateResponse> {
    let snapshot = state.book.snapshot().await;
    Json(PeriodStateResponse {
        date: query.date,
        state: snapshot.fiscal_settings.period_state(query.date),
    })
}
