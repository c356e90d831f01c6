//! Application configuration management.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Persistence configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Finance defaults applied when the store is first created.
    #[serde(default)]
    pub finance: FinanceConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Which key-value backend holds the persisted blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreProviderKind {
    /// Process-local memory; state is lost on restart.
    Memory,
    /// A directory on the local filesystem.
    #[default]
    LocalFs,
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Backend kind.
    #[serde(default)]
    pub provider: StoreProviderKind,
    /// Root directory for the `local_fs` provider.
    #[serde(default = "default_store_root")]
    pub root: PathBuf,
    /// Key under which the whole finance state is stored.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: StoreProviderKind::default(),
            root: default_store_root(),
            namespace: default_namespace(),
        }
    }
}

fn default_store_root() -> PathBuf {
    PathBuf::from("./data")
}

fn default_namespace() -> String {
    "barrkeh-super-system".to_string()
}

/// Finance defaults used to seed a fresh store.
#[derive(Debug, Clone, Deserialize)]
pub struct FinanceConfig {
    /// Percentage of the tax base reserved for tax.
    #[serde(default = "default_set_aside_percent")]
    pub tax_set_aside_percent: Decimal,
    /// `profit` or `revenue`.
    #[serde(default = "default_set_aside_method")]
    pub tax_set_aside_method: String,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            tax_set_aside_percent: default_set_aside_percent(),
            tax_set_aside_method: default_set_aside_method(),
        }
    }
}

fn default_set_aside_percent() -> Decimal {
    Decimal::from(25)
}

fn default_set_aside_method() -> String {
    "profit".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// `Configuration` if a source cannot be read or a value has the wrong
    /// shape.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BARRKEH").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
