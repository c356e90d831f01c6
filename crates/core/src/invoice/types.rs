//! Invoice types.

use barrkeh_shared::types::{AccountId, Currency, DocumentId, InvoiceId, JournalEntryId, LedgerEntryId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice lifecycle status.
///
/// ```text
/// Draft ──> Sent ──> Overdue
///   │        │          │
///   └────────┴──> Paid <┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Not yet sent to the client.
    Draft,
    /// Sent, awaiting payment.
    Sent,
    /// Paid in full.
    Paid,
    /// Past the due date and unpaid.
    Overdue,
}

impl InvoiceStatus {
    /// Returns the status as a string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }

    /// Whether moving from `self` to `next` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Sent | Self::Paid)
                | (Self::Sent, Self::Paid | Self::Overdue)
                | (Self::Overdue, Self::Paid)
        )
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issued invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Unique identifier.
    pub id: InvoiceId,
    /// Sequential number, e.g. `INV-2024-007`.
    pub number: String,
    /// Client name.
    pub client: String,
    /// Client email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Invoice total.
    pub amount: Decimal,
    /// Currency.
    #[serde(default)]
    pub currency: Currency,
    /// Lifecycle status.
    pub status: InvoiceStatus,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Receivable posting made at issuance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_entry_id: Option<JournalEntryId>,
    /// Debtor row opened at issuance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_entry_id: Option<LedgerEntryId>,
    /// Filed copy in the document vault.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<DocumentId>,
}

/// Input for issuing an invoice.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    /// Required.
    pub client: String,
    /// Client email.
    #[serde(default)]
    pub email: Option<String>,
    /// Positive total.
    pub amount: Decimal,
    /// Currency.
    #[serde(default)]
    pub currency: Currency,
    /// Defaults to today.
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    /// Defaults to 14 days after the issue date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Free-text notes.
    #[serde(default)]
    pub description: Option<String>,
    /// `draft` (default) or `sent`.
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
    /// Revenue account credited; defaults to services revenue.
    #[serde(default)]
    pub revenue_account_id: Option<AccountId>,
}

impl NewInvoice {
    /// Minimal input for `client` and `amount`.
    #[must_use]
    pub fn new(client: impl Into<String>, amount: Decimal) -> Self {
        Self {
            client: client.into(),
            email: None,
            amount,
            currency: Currency::default(),
            issue_date: None,
            due_date: None,
            description: None,
            status: None,
            revenue_account_id: None,
        }
    }
}
