//! Journal entry domain types.

use barrkeh_shared::types::{AccountId, JournalEntryId, JournalLineId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a journal entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalSource {
    /// Bank feed.
    Bank,
    /// Etsy payout.
    Etsy,
    /// Typed in by the user.
    Manual,
    /// Statement import.
    Import,
    /// Invoice issuance.
    Invoice,
    /// Supplier bill.
    Bill,
}

/// A single debit or credit line of a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalLine {
    /// Unique identifier for this line.
    pub id: JournalLineId,
    /// The account affected by this line.
    pub account_id: AccountId,
    /// Debit amount (zero on a credit line).
    pub debit: Decimal,
    /// Credit amount (zero on a debit line).
    pub credit: Decimal,
    /// Optional line memo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A balanced set of journal lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// Accounting date.
    pub date: NaiveDate,
    /// Narrative.
    pub description: String,
    /// Debit and credit lines; debits always equal credits.
    pub lines: Vec<JournalLine>,
    /// Origin of the entry.
    pub source: JournalSource,
    /// External reference such as an invoice number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Set by period close; a locked entry is immutable.
    #[serde(default)]
    pub locked: bool,
}

impl JournalEntry {
    /// Sum of all debit amounts.
    #[must_use]
    pub fn total_debit(&self) -> Decimal {
        self.lines.iter().map(|l| l.debit).sum()
    }

    /// Sum of all credit amounts.
    #[must_use]
    pub fn total_credit(&self) -> Decimal {
        self.lines.iter().map(|l| l.credit).sum()
    }

    /// Returns true if debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_debit() == self.total_credit()
    }
}

/// Caller-supplied line for posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalLineInput {
    /// Target account.
    pub account_id: AccountId,
    /// Debit amount.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount.
    #[serde(default)]
    pub credit: Decimal,
    /// Optional line memo.
    #[serde(default)]
    pub description: Option<String>,
}

impl JournalLineInput {
    /// A debit line.
    #[must_use]
    pub fn debit(account_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_id: AccountId::new(account_id),
            debit: amount,
            credit: Decimal::ZERO,
            description: None,
        }
    }

    /// A credit line.
    #[must_use]
    pub fn credit(account_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_id: AccountId::new(account_id),
            debit: Decimal::ZERO,
            credit: amount,
            description: None,
        }
    }

    /// Attaches a memo.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn into_line(self) -> JournalLine {
        JournalLine {
            id: JournalLineId::new(),
            account_id: self.account_id,
            debit: self.debit,
            credit: self.credit,
            description: self.description,
        }
    }
}

/// Input for posting a journal entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalEntry {
    /// Accounting date.
    pub date: NaiveDate,
    /// Narrative.
    pub description: String,
    /// At least two lines.
    pub lines: Vec<JournalLineInput>,
    /// Origin; manual when omitted.
    #[serde(default = "default_source")]
    pub source: JournalSource,
    /// External reference.
    #[serde(default)]
    pub reference: Option<String>,
    /// Explicit override to post into a locked period.
    #[serde(default)]
    pub allow_locked_period: bool,
}

fn default_source() -> JournalSource {
    JournalSource::Manual
}
