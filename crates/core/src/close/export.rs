//! Report exports: JSON month report, transaction CSV, text summary.

use barrkeh_shared::types::format_amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::tax::{DateWindow, TaxEngine, TaxSettings};
use crate::transactions::Transaction;

/// CSV header row.
pub const CSV_HEADER: [&str; 6] = ["Date", "Type", "Category", "Description", "Amount", "VAT Relevant"];

const SUMMARY_TITLE: &str = "BARRKEH DIGIPRODUCTS - FINANCIAL SUMMARY";

/// JSON month report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    /// `YYYY-MM`.
    pub month: String,
    /// Income total.
    pub income: Decimal,
    /// Expense total.
    pub expenses: Decimal,
    /// Income minus expenses.
    pub profit: Decimal,
    /// Set-aside under the configured settings.
    pub tax_set_aside: Decimal,
    /// The month's transactions.
    pub transactions: Vec<Transaction>,
}

impl MonthlyReport {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> FinanceResult<String> {
        serde_json::to_string_pretty(self).map_err(export_error)
    }
}

fn export_error(err: impl std::fmt::Display) -> FinanceError {
    FinanceError::Export(err.to_string())
}

/// Renders transactions as CSV, one row per transaction, rows separated
/// by `\n` with no trailing newline.
pub fn transactions_csv(transactions: &[Transaction]) -> FinanceResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER).map_err(export_error)?;
    for t in transactions {
        writer
            .write_record([
                t.date.format("%Y-%m-%d").to_string(),
                t.transaction_type.as_str().to_string(),
                t.category.clone(),
                t.description.clone(),
                format_amount(t.amount),
                if t.vat_relevant { "Yes" } else { "No" }.to_string(),
            ])
            .map_err(export_error)?;
    }

    let bytes = writer.into_inner().map_err(export_error)?;
    let mut text = String::from_utf8(bytes).map_err(export_error)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Period covered by a text summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryPeriod {
    /// One calendar month.
    Month {
        /// Calendar year.
        year: i32,
        /// Month 1-12.
        month: u32,
    },
    /// A whole calendar year.
    Year(i32),
}

impl SummaryPeriod {
    /// Date window of the period.
    pub fn window(self) -> FinanceResult<DateWindow> {
        match self {
            Self::Month { year, month } => DateWindow::month(year, month),
            Self::Year(year) => DateWindow::year(year),
        }
    }

    /// Transactions dated in the period, in log order.
    pub fn select(self, transactions: &[Transaction]) -> FinanceResult<Vec<Transaction>> {
        let window = self.window()?;
        Ok(transactions
            .iter()
            .filter(|t| window.contains(t.date))
            .cloned()
            .collect())
    }
}

/// Renders the plain-text financial summary for `period`.
pub fn render_summary(
    transactions: &[Transaction],
    settings: &TaxSettings,
    period: SummaryPeriod,
) -> FinanceResult<String> {
    let window = period.window()?;
    let label = match period {
        SummaryPeriod::Month { .. } => window.from.format("%B %Y").to_string(),
        SummaryPeriod::Year(year) => year.to_string(),
    };
    let summary = TaxEngine::summarize(transactions, &window, settings);
    let count = transactions.iter().filter(|t| window.contains(t.date)).count();

    Ok(format!(
        "{SUMMARY_TITLE}\n\
         {rule}\n\
         Period: {label}\n\
         \n\
         INCOME:     €{income}\n\
         EXPENSES:   €{expenses}\n\
         -----------------\n\
         PROFIT:     €{profit}\n\
         \n\
         Tax Set-Aside ({percent}% of {method}): €{set_aside}\n\
         \n\
         Total Transactions: {count}",
        rule = "=".repeat(SUMMARY_TITLE.len()),
        income = format_amount(summary.income),
        expenses = format_amount(summary.expenses),
        profit = format_amount(summary.profit),
        percent = settings.set_aside_percent.normalize(),
        method = settings.method.as_str(),
        set_aside = format_amount(summary.set_aside),
    ))
}
