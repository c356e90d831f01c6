//! Shared types, errors, and configuration for Barrkeh Books.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Currency codes and two-decimal money rendering
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, FinanceConfig, ServerConfig, StoreConfig, StoreProviderKind};
pub use error::{AppError, AppResult};
