//! Dashboard route.

use axum::{Json, Router, extract::State, routing::get};
use barrkeh_core::dashboard::DashboardStats;

use crate::AppState;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

/// GET `/dashboard` - Month-to-date and year-to-date figures.
async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardStats> {
    let today = state.book.today();
    Json(state.book.snapshot().await.dashboard(today))
}
