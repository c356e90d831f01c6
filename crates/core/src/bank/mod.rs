//! Bank connection manager.
//!
//! Connections are cached feed metadata only; no live fetch happens here.
//! Monthly reconciliation is an explicit user confirmation that the close
//! checklist reads back.

pub mod service;
pub mod types;

pub use types::{BankAccount, BankConnection, BankConnectionStatus, NewBankAccount, NewBankConnection, Reconciliation};
