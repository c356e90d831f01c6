//! Aggregates over the subsidiary ledger and open invoices.

use barrkeh_shared::types::LedgerEntryId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::types::{CounterpartyKind, LedgerEntry};
use crate::invoice::{Invoice, InvoiceStatus};

/// A debtor with a due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueEntry {
    /// Ledger entry id.
    pub id: LedgerEntryId,
    /// Counterparty name.
    pub name: String,
    /// Outstanding balance.
    pub balance: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
}

impl DueEntry {
    fn from_entry(entry: &LedgerEntry, due_date: NaiveDate) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            balance: entry.balance,
            due_date,
        }
    }
}

/// Receivable and payable position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    /// Sum of debtor balances.
    pub debtor_total: Decimal,
    /// Sum of creditor balances.
    pub creditor_total: Decimal,
    /// Debtors with an outstanding balance due before today.
    pub overdue_debtors: Vec<DueEntry>,
    /// Outstanding debtor with the earliest due date.
    pub next_due: Option<DueEntry>,
    /// Invoices not yet paid.
    pub open_invoices: usize,
    /// Amount of the unpaid invoices.
    pub open_invoice_total: Decimal,
}

impl LedgerSummary {
    /// Computes the summary as of `today`.
    #[must_use]
    pub fn compute(entries: &[LedgerEntry], invoices: &[Invoice], today: NaiveDate) -> Self {
        let total = |kind: CounterpartyKind| -> Decimal {
            entries
                .iter()
                .filter(|l| l.kind == kind)
                .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.balance))
        };

        let dated_debtors = || {
            entries
                .iter()
                .filter(|l| l.is_debtor() && l.balance > Decimal::ZERO)
                .filter_map(|l| l.due_date.map(|due| (l, due)))
        };

        let overdue_debtors = dated_debtors()
            .filter(|(_, due)| *due < today)
            .map(|(l, due)| DueEntry::from_entry(l, due))
            .collect();
        let next_due = dated_debtors()
            .min_by_key(|(_, due)| *due)
            .map(|(l, due)| DueEntry::from_entry(l, due));

        let open: Vec<&Invoice> = invoices
            .iter()
            .filter(|inv| inv.status != InvoiceStatus::Paid)
            .collect();

        Self {
            debtor_total: total(CounterpartyKind::Debtor),
            creditor_total: total(CounterpartyKind::Creditor),
            overdue_debtors,
            next_due,
            open_invoices: open.len(),
            open_invoice_total: open
                .iter()
                .fold(Decimal::ZERO, |acc, inv| acc.saturating_add(inv.amount)),
        }
    }
}
