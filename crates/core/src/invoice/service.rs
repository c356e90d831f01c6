//! Invoice operations on the finance state.
//!
//! Issuance touches four lists (invoices, journal, subsidiary ledger,
//! documents) and consumes the invoice counter. Every check that any of
//! those writes could fail on runs first, so a rejected issuance leaves
//! the state unchanged.

use barrkeh_shared::types::{AccountId, InvoiceId};
use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::types::{Invoice, InvoiceStatus, NewInvoice};
use crate::accounts::chart::{ACCOUNTS_RECEIVABLE, BANK_OPERATING, SERVICES_REVENUE};
use crate::documents::{DocumentType, NewDocument};
use crate::error::{FinanceError, FinanceResult};
use crate::ledger::{JournalLineInput, JournalSource, NewJournalEntry, check_amount};
use crate::state::FinanceState;
use crate::subledger::{CounterpartyKind, NewLedgerEntry};

/// Payment term applied when no due date is given.
pub const DEFAULT_PAYMENT_TERM_DAYS: u64 = 14;

impl FinanceState {
    /// Looks up an invoice.
    #[must_use]
    pub fn invoice(&self, id: InvoiceId) -> Option<&Invoice> {
        self.invoices.iter().find(|i| i.id == id)
    }

    /// Issues the next numbered invoice.
    ///
    /// Posts `Dr 1200 / Cr revenue`, files the invoice document and opens a
    /// debtor row for the client.
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank client, a non-positive amount, a due date
    ///   before the issue date or an initial status other than draft/sent
    /// - `PeriodLocked` when the issue date is in a locked period
    /// - `NotFound` / `AccountInactive` for the receivable or revenue account
    /// - `DuplicateInvoiceNumber` when the next number is already taken
    pub fn issue_invoice(
        &mut self,
        input: NewInvoice,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> FinanceResult<Invoice> {
        let client = input.client.trim().to_string();
        if client.is_empty() {
            return Err(FinanceError::validation("client is required"));
        }
        if input.amount <= Decimal::ZERO {
            return Err(FinanceError::validation("amount must be positive"));
        }
        check_amount(input.amount, "amount")?;
        let status = input.status.unwrap_or(InvoiceStatus::Draft);
        if !matches!(status, InvoiceStatus::Draft | InvoiceStatus::Sent) {
            return Err(FinanceError::validation(
                "a new invoice must start as draft or sent",
            ));
        }

        let issue_date = input.issue_date.unwrap_or(today);
        let due_date = match input.due_date {
            Some(due) => due,
            None => issue_date
                .checked_add_days(Days::new(DEFAULT_PAYMENT_TERM_DAYS))
                .ok_or_else(|| FinanceError::validation("due date out of range"))?,
        };
        if due_date < issue_date {
            return Err(FinanceError::validation(
                "due date cannot precede the issue date",
            ));
        }

        self.fiscal_settings.ensure_open(issue_date)?;
        let receivable = AccountId::new(ACCOUNTS_RECEIVABLE);
        let revenue = input
            .revenue_account_id
            .unwrap_or_else(|| AccountId::new(SERVICES_REVENUE));
        self.postable_account(&receivable)?;
        self.postable_account(&revenue)?;

        let number = self.fiscal_settings.peek_invoice_number()?;
        if self.invoices.iter().any(|i| i.number == number) {
            return Err(FinanceError::DuplicateInvoiceNumber(number));
        }

        let entry = self.post_entry(NewJournalEntry {
            date: issue_date,
            description: format!("Invoice {number} - {client}"),
            lines: vec![
                JournalLineInput::debit(receivable.as_str(), input.amount),
                JournalLineInput::credit(revenue.as_str(), input.amount),
            ],
            source: JournalSource::Invoice,
            reference: Some(number.clone()),
            allow_locked_period: false,
        })?;
        self.fiscal_settings.consume_invoice_number()?;

        let document = self.add_document(
            NewDocument {
                doc_type: DocumentType::Invoice,
                name: format!("{number} - {client}"),
                url: None,
                transaction_id: None,
                project_id: None,
            },
            now,
        )?;
        let debtor = self.add_ledger_entry(
            NewLedgerEntry {
                kind: CounterpartyKind::Debtor,
                name: client.clone(),
                balance: input.amount,
                currency: input.currency,
                due_date: Some(due_date),
                contact_email: input.email.clone(),
                notes: Some(format!("Invoice {number}")),
            },
            now,
        )?;

        let invoice = Invoice {
            id: InvoiceId::new(),
            number,
            client,
            email: input.email,
            amount: input.amount,
            currency: input.currency,
            status,
            issue_date,
            due_date,
            description: input.description,
            journal_entry_id: Some(entry.id),
            ledger_entry_id: Some(debtor.id),
            document_id: Some(document.id),
        };
        self.invoices.push(invoice.clone());
        Ok(invoice)
    }

    /// Moves an invoice to `status`.
    ///
    /// Marking an invoice paid posts the payment (`Dr 1100 / Cr 1200`,
    /// dated `today`) and settles the linked debtor row.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown id
    /// - `InvalidTransition` for a move the lifecycle does not allow
    /// - `PeriodLocked` when a payment would land in a locked period
    pub fn update_invoice_status(
        &mut self,
        id: InvoiceId,
        status: InvoiceStatus,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> FinanceResult<Invoice> {
        let index = self
            .invoices
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| FinanceError::not_found("invoice", id))?;
        let current = self.invoices[index].clone();
        if !current.status.can_transition_to(status) {
            return Err(FinanceError::InvalidTransition {
                entity: "invoice",
                from: current.status.to_string(),
                to: status.to_string(),
            });
        }

        if status == InvoiceStatus::Paid {
            self.post_entry(NewJournalEntry {
                date: today,
                description: format!("Payment for invoice {} - {}", current.number, current.client),
                lines: vec![
                    JournalLineInput::debit(BANK_OPERATING, current.amount),
                    JournalLineInput::credit(ACCOUNTS_RECEIVABLE, current.amount),
                ],
                source: JournalSource::Bank,
                reference: Some(current.number.clone()),
                allow_locked_period: false,
            })?;
            if let Some(debtor) = current
                .ledger_entry_id
                .filter(|lid| self.ledger_entry(*lid).is_some())
            {
                self.settle_ledger_entry(
                    debtor,
                    Some(format!("Invoice {} paid", current.number)),
                    now,
                )?;
            }
        }

        let invoice = &mut self.invoices[index];
        invoice.status = status;
        Ok(invoice.clone())
    }

    /// Flags every sent invoice due before `today` as overdue.
    pub fn mark_overdue(&mut self, today: NaiveDate) -> Vec<InvoiceId> {
        self.invoices
            .iter_mut()
            .filter(|i| i.status == InvoiceStatus::Sent && i.due_date < today)
            .map(|i| {
                i.status = InvoiceStatus::Overdue;
                i.id
            })
            .collect()
    }
}
