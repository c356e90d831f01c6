//! Fiscal year, period lock and numbering counters.

pub mod service;
pub mod settings;

pub use settings::{FiscalSettings, FiscalSettingsPatch, LockAction, LockEvent, PeriodState};
