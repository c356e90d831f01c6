//! Reversing entries.
//!
//! A posted entry is corrected by posting its mirror image rather than by
//! editing it, so a locked entry can still be neutralised in an open period.

use barrkeh_shared::types::JournalEntryId;
use chrono::NaiveDate;

use super::entry::{JournalEntry, JournalLineInput, NewJournalEntry};
use crate::error::{FinanceError, FinanceResult};
use crate::state::FinanceState;

/// Builds the swapped-sides lines for `original`.
///
/// Debits become credits and credits become debits; accounts and amounts are
/// preserved and each memo is prefixed with `Reversal: `.
#[must_use]
pub fn reversing_lines(original: &JournalEntry) -> Vec<JournalLineInput> {
    original
        .lines
        .iter()
        .map(|line| JournalLineInput {
            account_id: line.account_id.clone(),
            debit: line.credit,
            credit: line.debit,
            description: Some(format!(
                "Reversal: {}",
                line.description.clone().unwrap_or_default()
            )),
        })
        .collect()
}

impl FinanceState {
    /// Posts the reversing entry for `id` dated `date`.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank reason, `NotFound` for an unknown entry and
    /// every rule of [`Self::post_entry`] for the new entry (including
    /// `PeriodLocked` when `date` is in a locked period).
    pub fn reverse_entry(
        &mut self,
        id: JournalEntryId,
        date: NaiveDate,
        reason: &str,
    ) -> FinanceResult<JournalEntry> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(FinanceError::validation("a reversal needs a reason"));
        }
        let original = self
            .journal_entry(id)
            .ok_or_else(|| FinanceError::not_found("journal entry", id))?;

        let input = NewJournalEntry {
            date,
            description: format!(
                "Reversal of {}. Reason: {reason}",
                original.description
            ),
            lines: reversing_lines(original),
            source: original.source,
            reference: Some(id.to_string()),
            allow_locked_period: false,
        };
        self.post_entry(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{JournalSource, account_balances};
    use crate::tax::TaxSettings;
    use barrkeh_shared::types::AccountId;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn posted(state: &mut FinanceState) -> JournalEntry {
        state
            .post_entry(NewJournalEntry {
                date: date(2024, 1, 20),
                description: "Ad spend".to_string(),
                lines: vec![
                    JournalLineInput::debit("5100", dec!(35.00)).with_description("Pinterest"),
                    JournalLineInput::credit("1100", dec!(35.00)),
                ],
                source: JournalSource::Bank,
                reference: None,
                allow_locked_period: false,
            })
            .unwrap()
    }

    #[test]
    fn test_reversing_lines_swap_sides() {
        let mut state = FinanceState::seeded(date(2024, 1, 1), TaxSettings::default());
        let original = posted(&mut state);
        let lines = reversing_lines(&original);

        assert_eq!(lines[0].credit, dec!(35.00));
        assert_eq!(lines[0].debit, Decimal::ZERO);
        assert_eq!(lines[0].description.as_deref(), Some("Reversal: Pinterest"));
        assert_eq!(lines[1].debit, dec!(35.00));
    }

    #[test]
    fn test_reverse_locked_entry_in_open_period() {
        let mut state = FinanceState::seeded(date(2024, 1, 1), TaxSettings::default());
        let original = posted(&mut state);
        state.lock_period(date(2024, 1, 31), Utc::now()).unwrap();
        assert!(state.journal_entry(original.id).unwrap().locked);

        let reversal = state
            .reverse_entry(original.id, date(2024, 2, 1), "duplicate")
            .unwrap();
        assert_eq!(reversal.reference, Some(original.id.to_string()));
        assert_eq!(reversal.description, "Reversal of Ad spend. Reason: duplicate");

        let balances = account_balances(&state.journal_entries, &state.chart_of_accounts);
        let advertising = balances
            .iter()
            .find(|b| b.account_id == AccountId::new("5100"))
            .unwrap();
        assert_eq!(advertising.balance, Decimal::ZERO);
    }

    #[test]
    fn test_reversal_into_locked_period_rejected() {
        let mut state = FinanceState::seeded(date(2024, 1, 1), TaxSettings::default());
        let original = posted(&mut state);
        state.lock_period(date(2024, 1, 31), Utc::now()).unwrap();
        assert!(matches!(
            state.reverse_entry(original.id, date(2024, 1, 25), "typo"),
            Err(FinanceError::PeriodLocked { .. })
        ));
        assert!(matches!(
            state.reverse_entry(original.id, date(2024, 2, 1), "  "),
            Err(FinanceError::Validation(_))
        ));
    }
}
