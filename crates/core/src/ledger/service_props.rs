//! Property-based tests for the double-entry invariant on the journal.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::{JournalLineInput, JournalSource, NewJournalEntry};
use super::balance::trial_balance;
use crate::state::FinanceState;
use crate::tax::TaxSettings;

const ACCOUNTS: [&str; 6] = ["1000", "1100", "1200", "4000", "5000", "5100"];

fn line_strategy() -> impl Strategy<Value = JournalLineInput> {
    (0usize..ACCOUNTS.len(), 1i64..1_000_000i64, any::<bool>()).prop_map(
        |(account, cents, is_debit)| {
            let amount = Decimal::new(cents, 2);
            if is_debit {
                JournalLineInput::debit(ACCOUNTS[account], amount)
            } else {
                JournalLineInput::credit(ACCOUNTS[account], amount)
            }
        },
    )
}

fn entry(lines: Vec<JournalLineInput>, day: u32) -> NewJournalEntry {
    NewJournalEntry {
        date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        description: "generated".to_string(),
        lines,
        source: JournalSource::Manual,
        reference: None,
        allow_locked_period: false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Whatever mix of balanced and unbalanced postings is attempted, every
    /// entry that reaches the journal balances, and so does the trial balance.
    #[test]
    fn prop_every_posted_entry_balances(
        attempts in prop::collection::vec(
            (prop::collection::vec(line_strategy(), 1..6), 1u32..28),
            1..20,
        ),
    ) {
        let mut state = FinanceState::seeded(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            TaxSettings::default(),
        );

        let mut accepted = 0usize;
        for (lines, day) in attempts {
            let debit: Decimal = lines.iter().map(|l| l.debit).sum();
            let credit: Decimal = lines.iter().map(|l| l.credit).sum();
            let expect_ok = lines.len() >= 2 && debit == credit;

            let result = state.post_entry(entry(lines, day));
            prop_assert_eq!(result.is_ok(), expect_ok);
            if expect_ok {
                accepted += 1;
            }
        }

        prop_assert_eq!(state.journal_entries.len(), accepted);
        for posted in &state.journal_entries {
            prop_assert_eq!(posted.total_debit(), posted.total_credit());
        }
        prop_assert!(trial_balance(&state.journal_entries, &state.chart_of_accounts).is_balanced);
    }

    /// Completing any single line with its mirror always posts.
    #[test]
    fn prop_mirrored_line_posts(line in line_strategy()) {
        let mut state = FinanceState::seeded(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            TaxSettings::default(),
        );
        let mirror = JournalLineInput {
            account_id: "3000".into(),
            debit: line.credit,
            credit: line.debit,
            description: None,
        };
        let posted = state.post_entry(entry(vec![line, mirror], 15)).unwrap();
        prop_assert!(posted.is_balanced());
    }
}
