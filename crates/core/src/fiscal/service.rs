//! Period close operations on the finance state.

use chrono::{DateTime, NaiveDate, Utc};

use super::settings::{FiscalSettings, FiscalSettingsPatch};
use crate::error::FinanceResult;
use crate::state::FinanceState;

impl FinanceState {
    /// Closes every period up to and including `date`.
    ///
    /// Advances the lock date and locks every journal entry dated on or
    /// before it. Returns how many entries were newly locked.
    pub fn lock_period(&mut self, date: NaiveDate, at: DateTime<Utc>) -> FinanceResult<usize> {
        self.fiscal_settings.lock(date, at)?;
        Ok(self.lock_entries_through(date))
    }

    /// Reopens closed periods. Journal entries locked by earlier closes stay
    /// locked.
    pub fn unlock_period(&mut self, reason: &str, at: DateTime<Utc>) -> FinanceResult<NaiveDate> {
        self.fiscal_settings.unlock(reason, at)
    }

    /// Merges a fiscal settings patch.
    pub fn update_fiscal_settings(
        &mut self,
        patch: FiscalSettingsPatch,
    ) -> FinanceResult<FiscalSettings> {
        self.fiscal_settings.apply(patch)?;
        Ok(self.fiscal_settings.clone())
    }
}
