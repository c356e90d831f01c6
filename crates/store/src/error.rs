//! Store error types.

use barrkeh_core::FinanceError;
use thiserror::Error;

/// Result type alias using `StoreError`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while reading or writing the finance state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The operation was rejected by the domain.
    #[error(transparent)]
    Finance(#[from] FinanceError),

    /// The blob could not be encoded or decoded.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The key-value backend failed.
    #[error("storage operation failed: {0}")]
    Backend(String),

    /// The backend could not be set up.
    #[error("storage configuration error: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Finance(err) => err.error_code(),
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Backend(_) => "STORAGE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Finance(err) => err.http_status_code(),
            // An imported blob that does not parse is the caller's fault.
            Self::Serialization(_) => 400,
            Self::Backend(_) | Self::Configuration(_) => 500,
        }
    }

    /// Returns true if retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Finance(err) => err.is_retryable(),
            Self::Backend(_) => true,
            Self::Serialization(_) | Self::Configuration(_) => false,
        }
    }
}

impl From<opendal::Error> for StoreError {
    fn from(err: opendal::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
