//! Journal operations on the finance state.
//!
//! Every posting is validated as a whole before the journal is touched:
//! line rules, the fiscal lock and account status. A rejected posting
//! leaves no lines behind.

use barrkeh_shared::types::JournalEntryId;
use chrono::NaiveDate;

use super::entry::{JournalEntry, JournalLineInput, NewJournalEntry};
use super::validation::validate_lines;
use crate::error::{FinanceError, FinanceResult};
use crate::state::FinanceState;

impl FinanceState {
    /// Looks up a journal entry.
    #[must_use]
    pub fn journal_entry(&self, id: JournalEntryId) -> Option<&JournalEntry> {
        self.journal_entries.iter().find(|e| e.id == id)
    }

    /// Journal entries sorted by date; entries on the same date keep their
    /// insertion order.
    #[must_use]
    pub fn entries_by_date(&self) -> Vec<&JournalEntry> {
        let mut entries: Vec<&JournalEntry> = self.journal_entries.iter().collect();
        entries.sort_by_key(|e| e.date);
        entries
    }

    /// Posts a balanced journal entry.
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank description or malformed lines
    /// - `UnbalancedEntry` when debits and credits differ
    /// - `PeriodLocked` when the date is on or before the lock date and
    ///   `allow_locked_period` is not set
    /// - `NotFound` / `AccountInactive` for a bad account reference
    pub fn post_entry(&mut self, input: NewJournalEntry) -> FinanceResult<JournalEntry> {
        let description = input.description.trim();
        if description.is_empty() {
            return Err(FinanceError::validation("description is required"));
        }
        if !input.allow_locked_period {
            self.fiscal_settings.ensure_open(input.date)?;
        }
        self.check_lines(&input.lines)?;

        let entry = JournalEntry {
            id: JournalEntryId::new(),
            date: input.date,
            description: description.to_string(),
            lines: input.lines.into_iter().map(JournalLineInput::into_line).collect(),
            source: input.source,
            reference: input.reference,
            locked: false,
        };
        self.journal_entries.push(entry.clone());
        Ok(entry)
    }

    /// Locks an entry. Locking is one-way; locking twice is a no-op.
    pub fn lock_entry(&mut self, id: JournalEntryId) -> FinanceResult<JournalEntry> {
        let entry = self
            .journal_entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| FinanceError::not_found("journal entry", id))?;
        entry.locked = true;
        Ok(entry.clone())
    }

    /// Replaces the lines of an unlocked entry.
    ///
    /// # Errors
    ///
    /// `EntryLocked` once the entry is locked, `PeriodLocked` when its date is
    /// in a locked period, plus every posting rule of [`Self::post_entry`].
    pub fn update_entry_lines(
        &mut self,
        id: JournalEntryId,
        lines: Vec<JournalLineInput>,
    ) -> FinanceResult<JournalEntry> {
        let existing = self
            .journal_entry(id)
            .ok_or_else(|| FinanceError::not_found("journal entry", id))?;
        if existing.locked {
            return Err(FinanceError::EntryLocked(id));
        }
        self.fiscal_settings.ensure_open(existing.date)?;
        self.check_lines(&lines)?;

        let entry = self
            .journal_entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| FinanceError::not_found("journal entry", id))?;
        entry.lines = lines.into_iter().map(JournalLineInput::into_line).collect();
        Ok(entry.clone())
    }

    /// Locks every entry dated on or before `date`. Returns how many entries
    /// changed.
    pub fn lock_entries_through(&mut self, date: NaiveDate) -> usize {
        let mut count = 0;
        for entry in self
            .journal_entries
            .iter_mut()
            .filter(|e| !e.locked && e.date <= date)
        {
            entry.locked = true;
            count += 1;
        }
        count
    }

    fn check_lines(&self, lines: &[JournalLineInput]) -> FinanceResult<()> {
        validate_lines(lines)?;
        for line in lines {
            self.postable_account(&line.account_id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::JournalSource;
    use crate::tax::TaxSettings;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state() -> FinanceState {
        FinanceState::seeded(date(2024, 1, 1), TaxSettings::default())
    }

    fn sale(on: NaiveDate) -> NewJournalEntry {
        NewJournalEntry {
            date: on,
            description: "Etsy payout".to_string(),
            lines: vec![
                JournalLineInput::debit("1100", dec!(100.00)),
                JournalLineInput::credit("4000", dec!(100.00)),
            ],
            source: JournalSource::Etsy,
            reference: None,
            allow_locked_period: false,
        }
    }

    #[test]
    fn test_post_balanced_entry() {
        let mut state = state();
        let entry = state.post_entry(sale(date(2024, 1, 5))).unwrap();
        assert!(!entry.locked);
        assert_eq!(entry.lines.len(), 2);
        assert_eq!(state.journal_entries.len(), 1);
    }

    #[test]
    fn test_unbalanced_entry_leaves_journal_untouched() {
        let mut state = state();
        let mut input = sale(date(2024, 1, 5));
        input.lines[1].credit = dec!(90.00);
        assert!(matches!(
            state.post_entry(input),
            Err(FinanceError::UnbalancedEntry { .. })
        ));
        assert!(state.journal_entries.is_empty());
    }

    #[test]
    fn test_period_lock_enforced_on_post() {
        let mut state = state();
        state.lock_period(date(2024, 1, 31), Utc::now()).unwrap();

        assert_eq!(
            state.post_entry(sale(date(2024, 1, 15))).unwrap_err(),
            FinanceError::PeriodLocked {
                date: date(2024, 1, 15),
                lock_date: date(2024, 1, 31),
            }
        );
        assert!(state.post_entry(sale(date(2024, 2, 1))).is_ok());
    }

    #[test]
    fn test_explicit_override_posts_into_locked_period() {
        let mut state = state();
        state.lock_period(date(2024, 1, 31), Utc::now()).unwrap();
        let mut input = sale(date(2024, 1, 15));
        input.allow_locked_period = true;
        assert!(state.post_entry(input).is_ok());
    }

    #[test]
    fn test_unknown_account_rejected() {
        let mut state = state();
        let mut input = sale(date(2024, 1, 5));
        input.lines[0] = JournalLineInput::debit("9999", dec!(100.00));
        assert!(matches!(
            state.post_entry(input),
            Err(FinanceError::NotFound { .. })
        ));
    }

    #[test]
    fn test_locked_entry_is_immutable() {
        let mut state = state();
        let entry = state.post_entry(sale(date(2024, 3, 1))).unwrap();
        state.lock_entry(entry.id).unwrap();

        let lines = vec![
            JournalLineInput::debit("1100", dec!(50.00)),
            JournalLineInput::credit("4000", dec!(50.00)),
        ];
        assert_eq!(
            state.update_entry_lines(entry.id, lines),
            Err(FinanceError::EntryLocked(entry.id))
        );
        assert_eq!(state.journal_entries[0].total_debit(), dec!(100.00));
    }

    #[test]
    fn test_update_lines_revalidates_balance() {
        let mut state = state();
        let entry = state.post_entry(sale(date(2024, 3, 1))).unwrap();

        let unbalanced = vec![
            JournalLineInput::debit("1100", dec!(50.00)),
            JournalLineInput::credit("4000", dec!(40.00)),
        ];
        assert!(state.update_entry_lines(entry.id, unbalanced).is_err());

        let balanced = vec![
            JournalLineInput::debit("1100", dec!(50.00)),
            JournalLineInput::credit("4010", dec!(50.00)),
        ];
        let updated = state.update_entry_lines(entry.id, balanced).unwrap();
        assert_eq!(updated.total_credit(), dec!(50.00));
    }

    #[test]
    fn test_lock_entries_through() {
        let mut state = state();
        state.post_entry(sale(date(2024, 1, 10))).unwrap();
        state.post_entry(sale(date(2024, 2, 10))).unwrap();
        state.post_entry(sale(date(2024, 1, 31))).unwrap();

        assert_eq!(state.lock_entries_through(date(2024, 1, 31)), 2);
        assert_eq!(state.lock_entries_through(date(2024, 1, 31)), 0);
        let locked: Vec<bool> = state.journal_entries.iter().map(|e| e.locked).collect();
        assert_eq!(locked, vec![true, false, true]);
    }

    #[test]
    fn test_insertion_order_kept_and_date_sort_explicit() {
        let mut state = state();
        state.post_entry(sale(date(2024, 2, 10))).unwrap();
        state.post_entry(sale(date(2024, 1, 10))).unwrap();

        assert_eq!(state.journal_entries[0].date, date(2024, 2, 10));
        let sorted: Vec<NaiveDate> = state.entries_by_date().iter().map(|e| e.date).collect();
        assert_eq!(sorted, vec![date(2024, 1, 10), date(2024, 2, 10)]);
    }
}
