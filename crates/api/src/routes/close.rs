//! Monthly close and export routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use barrkeh_core::close::{MonthlyClose, render_summary, transactions_csv};

use super::tax::PeriodQuery;
use crate::{AppState, error::ApiResult};

/// Creates the close and export routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/close/{year}/{month}", get(get_close))
        .route("/close/{year}/{month}/report", get(get_report))
        .route("/exports/csv", get(export_csv))
        .route("/exports/summary", get(export_summary))
}

/// GET `/close/{year}/{month}` - Checklist and set-aside figures.
async fn get_close(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> ApiResult<Json<MonthlyClose>> {
    let close = state.book.snapshot().await.monthly_close(year, month)?;
    Ok(Json(close))
}

/// GET `/close/{year}/{month}/report` - Pretty-printed JSON report.
async fn get_report(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> ApiResult<impl IntoResponse> {
    let close = state.book.snapshot().await.monthly_close(year, month)?;
    let body = close.report().to_json()?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

/// GET `/exports/csv?year=&month=` - Transactions of the period as CSV.
async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<impl IntoResponse> {
    let period = query.period(state.book.today());
    let snapshot = state.book.snapshot().await;
    let selected = period.select(&snapshot.transactions)?;
    let body = transactions_csv(&selected)?;
    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body))
}

/// GET `/exports/summary?year=&month=` - Plain-text financial summary.
async fn export_summary(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> ApiResult<impl IntoResponse> {
    let period = query.period(state.book.today());
    let snapshot = state.book.snapshot().await;
    let body = render_summary(&snapshot.transactions, &snapshot.tax_settings, period)?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}
