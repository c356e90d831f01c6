//! Transaction domain types.

use barrkeh_shared::types::{AccountId, Currency, TransactionId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::subledger::CounterpartyKind;

/// Direction of a cash event. The stored amount is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money in.
    Income,
    /// Money out.
    Expense,
}

impl TransactionType {
    /// Lowercase label used in exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// Revenue stream of an income transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeStream {
    /// Etsy shop.
    Etsy,
    /// Own website.
    Website,
    /// Client services.
    Services,
    /// Anything else.
    Other,
}

/// Whether a transaction has cleared the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearingStatus {
    /// Not yet seen on the statement.
    Open,
    /// Matched on the statement.
    Cleared,
}

/// A cash-basis income or expense event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Positive amount.
    pub amount: Decimal,
    /// Currency of `amount`.
    pub currency: Currency,
    /// Free-form category, e.g. "Product Sales".
    pub category: String,
    /// Revenue stream, income only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<IncomeStream>,
    /// Counterparty name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    /// Debtor or creditor side of the counterparty.
    #[serde(
        default,
        rename = "counterpartyType",
        skip_serializing_if = "Option::is_none"
    )]
    pub counterparty_kind: Option<CounterpartyKind>,
    /// Bank clearing status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ClearingStatus>,
    /// Ledger account the event is booked against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Narrative.
    pub description: String,
    /// Counts towards VAT exposure.
    pub vat_relevant: bool,
    /// Filed receipt document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
    /// Expense reference assigned from the fiscal counter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Cash date.
    pub date: NaiveDate,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// True for income.
    #[must_use]
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    /// True for expenses.
    #[must_use]
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

/// Input for recording a transaction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// Income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Must be positive.
    pub amount: Decimal,
    /// Defaults to EUR.
    #[serde(default)]
    pub currency: Currency,
    /// Required.
    pub category: String,
    /// Income only.
    #[serde(default)]
    pub stream: Option<IncomeStream>,
    /// Counterparty name.
    #[serde(default)]
    pub counterparty: Option<String>,
    /// Debtor or creditor.
    #[serde(default, rename = "counterpartyType")]
    pub counterparty_kind: Option<CounterpartyKind>,
    /// Clearing status.
    #[serde(default)]
    pub status: Option<ClearingStatus>,
    /// Ledger account.
    #[serde(default)]
    pub account_id: Option<AccountId>,
    /// Narrative.
    #[serde(default)]
    pub description: String,
    /// Counts towards VAT exposure.
    #[serde(default)]
    pub vat_relevant: bool,
    /// Filed receipt document.
    #[serde(default)]
    pub receipt_id: Option<String>,
    /// Cash date.
    pub date: NaiveDate,
}

/// Partial update of a transaction. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    /// New direction.
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New currency.
    pub currency: Option<Currency>,
    /// New category.
    pub category: Option<String>,
    /// New stream.
    pub stream: Option<IncomeStream>,
    /// New counterparty.
    pub counterparty: Option<String>,
    /// New counterparty side.
    #[serde(rename = "counterpartyType")]
    pub counterparty_kind: Option<CounterpartyKind>,
    /// New clearing status.
    pub status: Option<ClearingStatus>,
    /// New account.
    pub account_id: Option<AccountId>,
    /// New narrative.
    pub description: Option<String>,
    /// New VAT flag.
    pub vat_relevant: Option<bool>,
    /// New receipt.
    pub receipt_id: Option<String>,
    /// New date.
    pub date: Option<NaiveDate>,
}
