//! HTTP API layer with Axum routes.
//!
//! Every handler is a thin adapter: it parses the request, runs one
//! `FinanceBook` read or write, and renders the result. Errors render as
//! `{ "error": CODE, "message": text }` with the error's status.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use barrkeh_store::FinanceBook;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The finance book; owner of every write.
    pub book: Arc<FinanceBook>,
}

impl AppState {
    /// Wraps a book.
    #[must_use]
    pub fn new(book: FinanceBook) -> Self {
        Self {
            book: Arc::new(book),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
