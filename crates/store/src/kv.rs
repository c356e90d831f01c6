//! Key-value persistence port and its backends.
//!
//! The whole finance state lives under one key, so the port only needs
//! whole-value reads and writes.
//!
//! ```text
//! ┌──────────────┐   get/put   ┌──────────────────────────────┐
//! │ FinanceBook  │ ──────────> │ KeyValueStore                │
//! └──────────────┘             │  ├─ MemoryStore   (dashmap)  │
//!                              │  └─ OpendalStore  (fs)       │
//!                              └──────────────────────────────┘
//! ```

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use barrkeh_shared::{StoreConfig, StoreProviderKind};
use dashmap::DashMap;
use opendal::{ErrorKind, Operator, services};

use crate::error::{StoreError, StoreResult};

/// Injected whole-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value under `key`, `None` when absent.
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Replaces the value under `key`.
    async fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()>;
}

/// Process-local store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by an OpenDAL operator.
#[derive(Debug, Clone)]
pub struct OpendalStore {
    operator: Operator,
}

impl OpendalStore {
    /// Wraps an existing operator.
    #[must_use]
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }

    /// Store rooted at a local directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not valid UTF-8 or the operator
    /// cannot be built.
    pub fn local_fs(root: &Path) -> StoreResult<Self> {
        let root = root
            .to_str()
            .ok_or_else(|| StoreError::configuration("invalid path"))?;
        let operator = Operator::new(services::Fs::default().root(root))
            .map_err(|e| StoreError::configuration(e.to_string()))?
            .finish();
        Ok(Self::new(operator))
    }
}

#[async_trait]
impl KeyValueStore for OpendalStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        match self.operator.read(key).await {
            Ok(buffer) => Ok(Some(buffer.to_vec())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.operator.write(key, value).await?;
        Ok(())
    }
}

/// Builds the backend selected in configuration.
///
/// # Errors
///
/// Returns an error if the file-system backend cannot be set up.
pub fn store_from_config(config: &StoreConfig) -> StoreResult<Arc<dyn KeyValueStore>> {
    match config.provider {
        StoreProviderKind::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreProviderKind::LocalFs => Ok(Arc::new(OpendalStore::local_fs(&config.root)?)),
    }
}
