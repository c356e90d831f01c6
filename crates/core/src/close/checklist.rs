//! Month-end figures and checklist.

use rust_decimal::Decimal;
use serde::Serialize;

use super::export::MonthlyReport;
use crate::error::FinanceResult;
use crate::state::FinanceState;
use crate::tax::{DateWindow, TaxEngine, TaxSetAsideMethod, TaxSettings, TaxSummary};
use crate::transactions::Transaction;

/// One checklist line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    /// Display label.
    pub label: &'static str,
    /// Whether the step is satisfied.
    pub done: bool,
}

/// The prepared close of one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyClose {
    /// Calendar year.
    pub year: i32,
    /// Month 1-12.
    pub month: u32,
    /// Aggregates under the configured settings.
    pub summary: TaxSummary,
    /// Set-aside if the base were profit.
    pub profit_basis_set_aside: Decimal,
    /// Set-aside if the base were revenue.
    pub revenue_basis_set_aside: Decimal,
    /// Close checklist in display order.
    pub checklist: Vec<ChecklistItem>,
    /// Transactions dated in the month, in log order.
    pub transactions: Vec<Transaction>,
}

impl MonthlyClose {
    /// Computes the close for `year`-`month`.
    ///
    /// `reconciled` is the user's explicit bank reconciliation for the
    /// month. Receipts count as attached when every expense in the month
    /// has a receipt and there is at least one expense.
    pub fn prepare(
        transactions: &[Transaction],
        settings: &TaxSettings,
        year: i32,
        month: u32,
        reconciled: bool,
    ) -> FinanceResult<Self> {
        let window = DateWindow::month(year, month)?;
        let summary = TaxEngine::summarize(transactions, &window, settings);
        let in_month: Vec<Transaction> = transactions
            .iter()
            .filter(|t| window.contains(t.date))
            .cloned()
            .collect();

        let receipts_attached = summary.expense_count > 0
            && in_month
                .iter()
                .filter(|t| t.is_expense())
                .all(|t| t.receipt_id.is_some());

        let basis = |method: TaxSetAsideMethod, base: Decimal| {
            TaxSettings {
                method,
                ..*settings
            }
            .set_aside(base)
        };

        Ok(Self {
            year,
            month,
            profit_basis_set_aside: basis(TaxSetAsideMethod::Profit, summary.profit),
            revenue_basis_set_aside: basis(TaxSetAsideMethod::Revenue, summary.income),
            checklist: vec![
                ChecklistItem {
                    label: "Review all income entries",
                    done: summary.income_count > 0,
                },
                ChecklistItem {
                    label: "Review all expense entries",
                    done: summary.expense_count > 0,
                },
                ChecklistItem {
                    label: "Reconcile with bank statement",
                    done: reconciled,
                },
                ChecklistItem {
                    label: "Attach all receipts",
                    done: receipts_attached,
                },
                ChecklistItem {
                    label: "Calculate tax set-aside",
                    done: !in_month.is_empty(),
                },
                ChecklistItem {
                    label: "Export monthly report",
                    done: false,
                },
            ],
            summary,
            transactions: in_month,
        })
    }

    /// `YYYY-MM`.
    #[must_use]
    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// The exportable report.
    #[must_use]
    pub fn report(&self) -> MonthlyReport {
        MonthlyReport {
            month: self.month_key(),
            income: self.summary.income,
            expenses: self.summary.expenses,
            profit: self.summary.profit,
            tax_set_aside: self.summary.set_aside,
            transactions: self.transactions.clone(),
        }
    }
}

impl FinanceState {
    /// Prepares the close of `year`-`month` from the stored transactions
    /// and reconciliations.
    pub fn monthly_close(&self, year: i32, month: u32) -> FinanceResult<MonthlyClose> {
        MonthlyClose::prepare(
            &self.transactions,
            &self.tax_settings,
            year,
            month,
            self.is_reconciled(year, month),
        )
    }
}
