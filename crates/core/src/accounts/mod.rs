//! Chart of accounts registry.
//!
//! Accounts are permanent: journal lines hold durable references to them, so
//! there is no delete, only deactivation.

pub mod chart;
pub mod types;

pub use chart::seed_chart;
pub use types::{Account, AccountPatch, AccountType, Channel, NewAccount, NormalBalance};
