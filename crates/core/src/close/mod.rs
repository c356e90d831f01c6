//! Monthly close workflow and report exports.
//!
//! Closing a month is advisory: it computes the month's figures and a
//! checklist. Locking the period is the separate `lock_period` call.

pub mod checklist;
pub mod export;

pub use checklist::{ChecklistItem, MonthlyClose};
pub use export::{MonthlyReport, SummaryPeriod, render_summary, transactions_csv};
