//! Debtor and creditor subsidiary ledger.
//!
//! Each counterparty row keeps an append-only list of balance movements; the
//! stored balance is always the fold of that list.

pub mod service;
pub mod summary;
pub mod types;

pub use summary::{DueEntry, LedgerSummary};
pub use types::{
    BalanceMovement, CounterpartyKind, LedgerEntry, LedgerEntryPatch, MovementKind, NewLedgerEntry,
};
