//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod accounts;
pub mod bank;
pub mod close;
pub mod dashboard;
pub mod fiscal;
pub mod health;
pub mod invoices;
pub mod journal;
pub mod ledger;
pub mod records;
pub mod store;
pub mod tax;
pub mod transactions;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(accounts::routes())
        .merge(journal::routes())
        .merge(ledger::routes())
        .merge(invoices::routes())
        .merge(transactions::routes())
        .merge(tax::routes())
        .merge(fiscal::routes())
        .merge(bank::routes())
        .merge(close::routes())
        .merge(dashboard::routes())
        .merge(records::routes())
        .merge(store::routes())
}
