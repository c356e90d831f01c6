//! Core bookkeeping logic for Barrkeh Books.
//!
//! This crate contains pure business logic with no web, storage or async
//! dependencies. All domain types, validation rules and calculations live
//! here; persistence and concurrency are the store crate's concern.
//!
//! # Modules
//!
//! - `accounts` - Chart of accounts registry
//! - `ledger` - Double-entry journal, reversals, trial balance
//! - `subledger` - Debtor/creditor balances with a movement trail
//! - `invoice` - Sequential invoice issuance and lifecycle
//! - `transactions` - Cash-basis income/expense log
//! - `tax` - Set-aside engine, VAT profile, reporting windows
//! - `fiscal` - Lock date, numbering counters, fiscal year
//! - `close` - Monthly close checklist and report exports
//! - `dashboard` - Month-to-date and year-to-date read model
//! - `bank`, `documents`, `contacts`, `fixed_assets`, `imports` -
//!   supporting records

pub mod accounts;
pub mod bank;
pub mod close;
pub mod contacts;
pub mod dashboard;
pub mod documents;
pub mod error;
pub mod fiscal;
pub mod fixed_assets;
pub mod imports;
pub mod invoice;
pub mod ledger;
pub mod state;
pub mod subledger;
pub mod tax;
pub mod transactions;

pub use error::{FinanceError, FinanceResult};
pub use state::{FinanceState, STATE_VERSION};
