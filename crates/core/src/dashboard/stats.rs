//! Month-to-date and year-to-date figures for the finance dashboard.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::state::FinanceState;
use crate::subledger::LedgerSummary;
use crate::tax::{DateWindow, StreamBreakdown, TaxEngine};
use crate::transactions::Transaction;

/// Number of transactions listed as recent activity.
pub const RECENT_TRANSACTIONS: usize = 10;

/// Dashboard figures as of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Income this month.
    pub monthly_revenue: Decimal,
    /// Expenses this month.
    pub monthly_expenses: Decimal,
    /// Profit this month.
    pub monthly_profit: Decimal,
    /// Set-aside for this month.
    pub tax_set_aside: Decimal,
    /// Income this year.
    pub yearly_revenue: Decimal,
    /// Expenses this year.
    pub yearly_expenses: Decimal,
    /// Profit this year.
    pub yearly_profit: Decimal,
    /// Set-aside for this year.
    pub yearly_tax_set_aside: Decimal,
    /// VAT-relevant amounts this year, both directions.
    pub vat_relevant_total: Decimal,
    /// Income this year per stream.
    pub by_stream: StreamBreakdown,
    /// Last recorded transactions, newest first.
    pub recent_transactions: Vec<Transaction>,
    /// Receivables and payables.
    pub ledger: LedgerSummary,
}

impl FinanceState {
    /// Computes the dashboard as of `today`.
    #[must_use]
    pub fn dashboard(&self, today: NaiveDate) -> DashboardStats {
        let month = TaxEngine::summarize(
            &self.transactions,
            &DateWindow::month_to_date(today),
            &self.tax_settings,
        );
        let year_window = DateWindow::year_to_date(today);
        let year = TaxEngine::summarize(&self.transactions, &year_window, &self.tax_settings);

        DashboardStats {
            monthly_revenue: month.income,
            monthly_expenses: month.expenses,
            monthly_profit: month.profit,
            tax_set_aside: month.set_aside,
            yearly_revenue: year.income,
            yearly_expenses: year.expenses,
            yearly_profit: year.profit,
            yearly_tax_set_aside: year.set_aside,
            vat_relevant_total: year.vat_exposure,
            by_stream: TaxEngine::income_by_stream(&self.transactions, &year_window),
            recent_transactions: self
                .transactions
                .iter()
                .rev()
                .take(RECENT_TRANSACTIONS)
                .cloned()
                .collect(),
            ledger: LedgerSummary::compute(&self.ledger_entries, &self.invoices, today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::TaxSettings;
    use crate::tax::engine::fixtures::tx;
    use crate::transactions::{IncomeStream, TransactionType};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dashboard_windows() {
        let mut state = FinanceState::seeded(date(2024, 1, 1), TaxSettings::default());
        let mut etsy = tx(TransactionType::Income, dec!(200), date(2024, 3, 3));
        etsy.stream = Some(IncomeStream::Etsy);
        etsy.vat_relevant = true;
        let mut old = tx(TransactionType::Income, dec!(999), date(2023, 12, 30));
        old.vat_relevant = true;
        state.transactions = vec![
            old,
            tx(TransactionType::Income, dec!(100), date(2024, 1, 5)),
            etsy,
            tx(TransactionType::Expense, dec!(40), date(2024, 3, 10)),
            // Dated after `today`; outside both windows.
            tx(TransactionType::Income, dec!(70), date(2024, 3, 20)),
        ];

        let stats = state.dashboard(date(2024, 3, 15));
        assert_eq!(stats.monthly_revenue, dec!(200));
        assert_eq!(stats.monthly_expenses, dec!(40));
        assert_eq!(stats.monthly_profit, dec!(160));
        assert_eq!(stats.tax_set_aside, dec!(40.00));
        assert_eq!(stats.yearly_revenue, dec!(300));
        assert_eq!(stats.yearly_profit, dec!(260));
        assert_eq!(stats.yearly_tax_set_aside, dec!(65.00));
        assert_eq!(stats.vat_relevant_total, dec!(200));
        assert_eq!(stats.by_stream.etsy, dec!(200));
        assert_eq!(stats.by_stream.other, dec!(100));
        assert_eq!(stats.recent_transactions.len(), 5);
        assert_eq!(stats.recent_transactions[0].amount, dec!(70));
    }

    #[test]
    fn test_recent_transactions_are_capped() {
        let mut state = FinanceState::seeded(date(2024, 1, 1), TaxSettings::default());
        state.transactions = (1..=12)
            .map(|d| tx(TransactionType::Expense, Decimal::from(d), date(2024, 2, d)))
            .collect();
        let stats = state.dashboard(date(2024, 2, 28));
        assert_eq!(stats.recent_transactions.len(), RECENT_TRANSACTIONS);
        assert_eq!(stats.recent_transactions[0].amount, dec!(12));
        assert_eq!(stats.recent_transactions[9].amount, dec!(3));
    }
}
