//! Cash-basis income and expense log.

pub mod service;
pub mod types;

pub use types::{
    ClearingStatus, IncomeStream, NewTransaction, Transaction, TransactionPatch, TransactionType,
};
