//! Property-based tests for the tax engine.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::fixtures::tx;
use super::engine::TaxEngine;
use super::settings::{TaxSetAsideMethod, TaxSettings};
use super::window::DateWindow;
use crate::transactions::{Transaction, TransactionType};

fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (any::<bool>(), 1i64..10_000_000i64, 1u32..=366).prop_map(|(income, cents, ordinal)| {
        let transaction_type = if income {
            TransactionType::Income
        } else {
            TransactionType::Expense
        };
        let date = NaiveDate::from_yo_opt(2024, ordinal).unwrap();
        tx(transaction_type, Decimal::new(cents, 2), date)
    })
}

fn settings_strategy() -> impl Strategy<Value = TaxSettings> {
    (0i64..=10_000i64, any::<bool>()).prop_map(|(basis_points, profit)| {
        let method = if profit {
            TaxSetAsideMethod::Profit
        } else {
            TaxSetAsideMethod::Revenue
        };
        TaxSettings::new(Decimal::new(basis_points, 2), method).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The set-aside is never negative, whatever the window and settings.
    #[test]
    fn prop_set_aside_non_negative(
        transactions in prop::collection::vec(transaction_strategy(), 0..40),
        settings in settings_strategy(),
        month in 1u32..=12,
    ) {
        let window = DateWindow::month(2024, month).unwrap();
        let summary = TaxEngine::summarize(&transactions, &window, &settings);
        prop_assert!(summary.set_aside >= Decimal::ZERO);
        prop_assert_eq!(summary.profit, summary.income - summary.expenses);
    }

    /// Monthly totals add up to the yearly total.
    #[test]
    fn prop_months_partition_year(
        transactions in prop::collection::vec(transaction_strategy(), 0..40),
    ) {
        let settings = TaxSettings::default();
        let year = TaxEngine::summarize(
            &transactions,
            &DateWindow::year(2024).unwrap(),
            &settings,
        );
        let mut income = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;
        for month in 1..=12 {
            let summary = TaxEngine::summarize(
                &transactions,
                &DateWindow::month(2024, month).unwrap(),
                &settings,
            );
            income += summary.income;
            expenses += summary.expenses;
        }
        prop_assert_eq!(income, year.income);
        prop_assert_eq!(expenses, year.expenses);
    }
}
