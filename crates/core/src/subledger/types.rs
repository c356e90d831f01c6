//! Subsidiary ledger domain types.

use barrkeh_shared::types::{Currency, LedgerEntryId, MovementId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of a counterparty balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterpartyKind {
    /// Owes the business.
    Debtor,
    /// Is owed by the business.
    Creditor,
}

/// Why a balance changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Balance at creation.
    Opening,
    /// Manual increase or decrease.
    Adjustment,
    /// Payment that clears the balance.
    Settlement,
}

/// One signed change to a counterparty balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceMovement {
    /// Unique identifier.
    pub id: MovementId,
    /// Reason.
    pub kind: MovementKind,
    /// Signed delta.
    pub amount: Decimal,
    /// Optional note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// When the movement was recorded.
    pub at: DateTime<Utc>,
}

/// An open receivable or payable for one counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Unique identifier.
    pub id: LedgerEntryId,
    /// Debtor or creditor.
    pub kind: CounterpartyKind,
    /// Counterparty name.
    pub name: String,
    /// Outstanding amount, the sum of `movements`.
    pub balance: Decimal,
    /// Currency of `balance`.
    pub currency: Currency,
    /// When payment is due.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Refreshed on every write.
    pub last_activity: DateTime<Utc>,
    /// Contact address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Audit trail, oldest first.
    #[serde(default)]
    pub movements: Vec<BalanceMovement>,
}

impl LedgerEntry {
    /// Fold of the movement log.
    #[must_use]
    pub fn derived_balance(&self) -> Decimal {
        self.movements.iter().map(|m| m.amount).sum()
    }

    /// True for receivables.
    #[must_use]
    pub fn is_debtor(&self) -> bool {
        self.kind == CounterpartyKind::Debtor
    }

    pub(crate) fn push_movement(
        &mut self,
        kind: MovementKind,
        amount: Decimal,
        memo: Option<String>,
        at: DateTime<Utc>,
    ) {
        self.movements.push(BalanceMovement {
            id: MovementId::new(),
            kind,
            amount,
            memo,
            at,
        });
        self.balance = self.derived_balance();
        self.last_activity = at;
    }
}

/// Input for opening a ledger entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLedgerEntry {
    /// Debtor or creditor.
    pub kind: CounterpartyKind,
    /// Required.
    pub name: String,
    /// Opening balance, not negative.
    pub balance: Decimal,
    /// Defaults to EUR.
    #[serde(default)]
    pub currency: Currency,
    /// When payment is due.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Contact address.
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Contact-level update. Balances change only through movements.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryPatch {
    /// New name.
    pub name: Option<String>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// New contact address.
    pub contact_email: Option<String>,
    /// New notes.
    pub notes: Option<String>,
}
