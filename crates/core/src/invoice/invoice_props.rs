//! Property-based tests for invoice numbering.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::types::NewInvoice;
use crate::state::FinanceState;
use crate::tax::TaxSettings;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

proptest! {
    #[test]
    fn prop_numbers_unique_and_increasing(
        amounts in prop::collection::vec(1i64..1_000_000, 1..40),
        rejected_every in 2usize..6,
    ) {
        let mut state = FinanceState::seeded(today(), TaxSettings::default());
        let mut issued = Vec::new();

        for (i, cents) in amounts.iter().enumerate() {
            // Interleave rejected attempts; they must not consume numbers.
            if i % rejected_every == 0 {
                let bad = NewInvoice::new("", Decimal::new(*cents, 2));
                prop_assert!(state.issue_invoice(bad, today(), Utc::now()).is_err());
            }
            let input = NewInvoice::new(format!("Client {i}"), Decimal::new(*cents, 2));
            issued.push(state.issue_invoice(input, today(), Utc::now()).unwrap().number);
        }

        let expected: Vec<String> = (1..=issued.len())
            .map(|n| format!("INV-2024-{n:03}"))
            .collect();
        prop_assert_eq!(&issued, &expected);
        prop_assert_eq!(
            state.fiscal_settings.next_invoice_number as usize,
            issued.len() + 1
        );
    }
}
