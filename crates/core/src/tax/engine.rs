//! Set-aside and income aggregation over a transaction window.

use rust_decimal::Decimal;
use serde::Serialize;

use super::settings::{TaxSetAsideMethod, TaxSettings};
use super::window::DateWindow;
use crate::transactions::{IncomeStream, Transaction, TransactionType};

/// Aggregates for one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSummary {
    /// Sum of income amounts.
    pub income: Decimal,
    /// Sum of expense amounts.
    pub expenses: Decimal,
    /// `income - expenses`, may be negative.
    pub profit: Decimal,
    /// Profit or income, per the configured method.
    pub base: Decimal,
    /// `max(0, base * percent / 100)` in cents.
    pub set_aside: Decimal,
    /// Sum of VAT-relevant amounts, both directions.
    pub vat_exposure: Decimal,
    /// Number of income transactions.
    pub income_count: usize,
    /// Number of expense transactions.
    pub expense_count: usize,
}

/// Income per revenue stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreamBreakdown {
    /// Etsy shop.
    pub etsy: Decimal,
    /// Own website.
    pub website: Decimal,
    /// Client services.
    pub services: Decimal,
    /// Other income, including income without a stream.
    pub other: Decimal,
}

/// Stateless tax calculator.
pub struct TaxEngine;

impl TaxEngine {
    /// Summarizes the transactions dated inside `window`.
    #[must_use]
    pub fn summarize(
        transactions: &[Transaction],
        window: &DateWindow,
        settings: &TaxSettings,
    ) -> TaxSummary {
        let mut income = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;
        let mut vat_exposure = Decimal::ZERO;
        let mut income_count = 0;
        let mut expense_count = 0;

        for t in transactions.iter().filter(|t| window.contains(t.date)) {
            match t.transaction_type {
                TransactionType::Income => {
                    income = income.saturating_add(t.amount);
                    income_count += 1;
                }
                TransactionType::Expense => {
                    expenses = expenses.saturating_add(t.amount);
                    expense_count += 1;
                }
            }
            if t.vat_relevant {
                vat_exposure = vat_exposure.saturating_add(t.amount);
            }
        }

        let profit = income.saturating_sub(expenses);
        let base = match settings.method {
            TaxSetAsideMethod::Profit => profit,
            TaxSetAsideMethod::Revenue => income,
        };

        TaxSummary {
            income,
            expenses,
            profit,
            base,
            set_aside: settings.set_aside(base),
            vat_exposure,
            income_count,
            expense_count,
        }
    }

    /// Income inside `window` split by revenue stream.
    #[must_use]
    pub fn income_by_stream(transactions: &[Transaction], window: &DateWindow) -> StreamBreakdown {
        let mut breakdown = StreamBreakdown::default();
        for t in transactions
            .iter()
            .filter(|t| t.is_income() && window.contains(t.date))
        {
            let slot = match t.stream {
                Some(IncomeStream::Etsy) => &mut breakdown.etsy,
                Some(IncomeStream::Website) => &mut breakdown.website,
                Some(IncomeStream::Services) => &mut breakdown.services,
                Some(IncomeStream::Other) | None => &mut breakdown.other,
            };
            *slot = slot.saturating_add(t.amount);
        }
        breakdown
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use barrkeh_shared::types::{Currency, TransactionId};
    use chrono::{NaiveDate, TimeZone, Utc};

    pub fn tx(
        transaction_type: TransactionType,
        amount: Decimal,
        date: NaiveDate,
    ) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            transaction_type,
            amount,
            currency: Currency::Eur,
            category: "General".to_string(),
            stream: None,
            counterparty: None,
            counterparty_kind: None,
            status: None,
            account_id: None,
            description: String::new(),
            vat_relevant: false,
            receipt_id: None,
            reference: None,
            date,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    /// The three transactions of the worked set-aside example.
    pub fn worked_example() -> Vec<Transaction> {
        vec![
            tx(TransactionType::Income, Decimal::from(100), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
            tx(TransactionType::Expense, Decimal::from(40), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()),
            tx(TransactionType::Income, Decimal::from(50), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{tx, worked_example};
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_worked_example_profit_basis() {
        let january = DateWindow::month(2024, 1).unwrap();
        let summary = TaxEngine::summarize(&worked_example(), &january, &TaxSettings::default());

        assert_eq!(summary.income, dec!(100));
        assert_eq!(summary.expenses, dec!(40));
        assert_eq!(summary.profit, dec!(60));
        assert_eq!(summary.set_aside, dec!(15.00));
        assert_eq!(summary.income_count, 1);
        assert_eq!(summary.expense_count, 1);
    }

    #[test]
    fn test_worked_example_revenue_basis() {
        let january = DateWindow::month(2024, 1).unwrap();
        let settings = TaxSettings::new(dec!(25), TaxSetAsideMethod::Revenue).unwrap();
        let summary = TaxEngine::summarize(&worked_example(), &january, &settings);
        assert_eq!(summary.base, dec!(100));
        assert_eq!(summary.set_aside, dec!(25.00));
    }

    #[test]
    fn test_loss_sets_nothing_aside() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let transactions = vec![
            tx(TransactionType::Income, dec!(10), day),
            tx(TransactionType::Expense, dec!(300), day),
        ];
        let summary = TaxEngine::summarize(
            &transactions,
            &DateWindow::month(2024, 5).unwrap(),
            &TaxSettings::default(),
        );
        assert_eq!(summary.profit, dec!(-290));
        assert_eq!(summary.set_aside, Decimal::ZERO);
    }

    #[test]
    fn test_vat_exposure_and_streams() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut etsy = tx(TransactionType::Income, dec!(30), day);
        etsy.stream = Some(IncomeStream::Etsy);
        etsy.vat_relevant = true;
        let mut hosting = tx(TransactionType::Expense, dec!(5), day);
        hosting.vat_relevant = true;
        let plain = tx(TransactionType::Income, dec!(7), day);
        let transactions = vec![etsy, hosting, plain];

        let window = DateWindow::month(2024, 6).unwrap();
        let summary = TaxEngine::summarize(&transactions, &window, &TaxSettings::default());
        assert_eq!(summary.vat_exposure, dec!(35));

        let streams = TaxEngine::income_by_stream(&transactions, &window);
        assert_eq!(streams.etsy, dec!(30));
        assert_eq!(streams.other, dec!(7));
        assert_eq!(streams.services, Decimal::ZERO);
    }

    #[test]
    fn test_oversized_amounts_saturate_instead_of_panicking() {
        let day = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let mut transactions = vec![
            tx(TransactionType::Income, Decimal::MAX, day),
            tx(TransactionType::Income, Decimal::MAX, day),
            tx(TransactionType::Expense, Decimal::MAX, day),
        ];
        for t in &mut transactions {
            t.vat_relevant = true;
        }
        let window = DateWindow::month(2024, 7).unwrap();

        let summary = TaxEngine::summarize(&transactions, &window, &TaxSettings::default());
        assert_eq!(summary.income, Decimal::MAX);
        assert_eq!(summary.vat_exposure, Decimal::MAX);
        assert_eq!(summary.income_count, 2);

        let streams = TaxEngine::income_by_stream(&transactions, &window);
        assert_eq!(streams.other, Decimal::MAX);
    }
}
