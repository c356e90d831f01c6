//! Barrkeh finance server
//!
//! Main entry point for the bookkeeping service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use barrkeh_api::{AppState, create_router};
use barrkeh_core::FinanceState;
use barrkeh_core::tax::{TaxSetAsideMethod, TaxSettings};
use barrkeh_shared::{AppConfig, AppError, FinanceConfig};
use barrkeh_store::{Clock, FinanceBook, SystemClock, store_from_config};

/// Tax settings for a fresh store.
fn seed_tax_settings(config: &FinanceConfig) -> Result<TaxSettings, AppError> {
    let method: TaxSetAsideMethod = config
        .tax_set_aside_method
        .parse()
        .map_err(|e| AppError::Configuration(format!("finance.tax_set_aside_method: {e}")))?;
    TaxSettings::new(config.tax_set_aside_percent, method)
        .map_err(|e| AppError::Configuration(format!("finance.tax_set_aside_percent: {e}")))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "barrkeh=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    // Open the key-value backend
    let store = store_from_config(&config.store)
        .map_err(|e| AppError::Storage(e.to_string()))?;
    info!(
        provider = ?config.store.provider,
        root = %config.store.root.display(),
        namespace = %config.store.namespace,
        "Store opened"
    );

    // Load the persisted state, or seed a fresh one
    let clock = Arc::new(SystemClock);
    let seed = FinanceState::seeded(clock.today(), seed_tax_settings(&config.finance)?);
    let book = FinanceBook::open_with_clock(store, &config.store.namespace, seed, clock)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    let app = create_router(AppState::new(book));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
