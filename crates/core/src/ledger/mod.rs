//! Double-entry journal.
//!
//! This module implements the core ledger functionality:
//! - Journal entries and their debit/credit lines
//! - Line validation and the balance rule
//! - Posting, locking and line replacement under the fiscal lock
//! - Reversing entries
//! - Account balances and the trial balance

pub mod balance;
pub mod entry;
pub mod reversal;
pub mod service;
pub mod validation;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod validation_props;

pub use balance::{AccountBalance, TrialBalance, account_balances, trial_balance};
pub use entry::{JournalEntry, JournalLine, JournalLineInput, JournalSource, NewJournalEntry};
pub use reversal::reversing_lines;
pub use validation::{MAX_AMOUNT, check_amount, validate_lines};
