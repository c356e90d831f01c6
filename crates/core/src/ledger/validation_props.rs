//! Property-based tests for journal line validation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::JournalLineInput;
use super::validation::validate_lines;
use crate::error::FinanceError;

/// Amounts from 0.01 to 1,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Splits `total` into `parts` positive amounts that sum exactly to it.
fn split(total_cents: i64, parts: usize) -> Vec<Decimal> {
    let parts_i64 = i64::try_from(parts).unwrap();
    let base = total_cents / parts_i64;
    let mut amounts: Vec<Decimal> = (0..parts).map(|_| Decimal::new(base, 2)).collect();
    let remainder = total_cents - base * parts_i64;
    amounts[0] += Decimal::new(remainder, 2);
    amounts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any set of lines whose debit and credit sides sum to the same total
    /// passes validation.
    #[test]
    fn prop_balanced_lines_accepted(
        total_cents in 1_000i64..100_000_000i64,
        debit_parts in 1usize..5,
        credit_parts in 1usize..5,
    ) {
        let mut lines: Vec<JournalLineInput> = split(total_cents, debit_parts)
            .into_iter()
            .map(|amount| JournalLineInput::debit("1100", amount))
            .collect();
        lines.extend(
            split(total_cents, credit_parts)
                .into_iter()
                .map(|amount| JournalLineInput::credit("4000", amount)),
        );

        let (debit, credit) = validate_lines(&lines).unwrap();
        prop_assert_eq!(debit, credit);
        prop_assert_eq!(debit, Decimal::new(total_cents, 2));
    }

    /// Any difference between the sides is rejected as unbalanced.
    #[test]
    fn prop_unbalanced_lines_rejected(
        debit in positive_amount(),
        credit in positive_amount(),
    ) {
        prop_assume!(debit != credit);
        let lines = vec![
            JournalLineInput::debit("1100", debit),
            JournalLineInput::credit("4000", credit),
        ];

        let result = validate_lines(&lines);
        prop_assert!(
            matches!(result, Err(FinanceError::UnbalancedEntry { .. })),
            "Unbalanced lines should be rejected, got: {:?}",
            result
        );
    }

    /// A single line never forms a valid entry.
    #[test]
    fn prop_single_line_rejected(amount in positive_amount()) {
        let lines = vec![JournalLineInput::debit("1100", amount)];
        prop_assert!(matches!(validate_lines(&lines), Err(FinanceError::Validation(_))));
    }

    /// Zero-amount lines are rejected even when the entry balances.
    #[test]
    fn prop_zero_line_rejected(amount in positive_amount()) {
        let lines = vec![
            JournalLineInput::debit("1100", amount),
            JournalLineInput::credit("4000", amount),
            JournalLineInput::debit("5000", Decimal::ZERO),
        ];
        prop_assert!(matches!(validate_lines(&lines), Err(FinanceError::Validation(_))));
    }
}
