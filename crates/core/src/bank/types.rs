//! Bank feed types.

use barrkeh_shared::types::{BankAccountId, BankConnectionId, Currency};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Connection health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankConnectionStatus {
    /// Feed is live.
    #[default]
    Connected,
    /// Consent expired; the user must re-authorise.
    NeedsAuth,
    /// Feed stopped.
    Disconnected,
}

/// An account exposed by a bank connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    /// Unique identifier.
    pub id: BankAccountId,
    /// Display name.
    pub name: String,
    /// Last known balance.
    pub balance: Decimal,
    /// Currency.
    #[serde(default)]
    pub currency: Currency,
    /// When the balance was read.
    pub last_updated: DateTime<Utc>,
}

/// A connected institution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankConnection {
    /// Unique identifier.
    pub id: BankConnectionId,
    /// Institution name.
    pub institution: String,
    /// Health.
    pub status: BankConnectionStatus,
    /// Last successful sync.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
    /// Accounts at the institution.
    #[serde(default)]
    pub accounts: Vec<BankAccount>,
}

impl BankConnection {
    /// Sum of the cached account balances.
    #[must_use]
    pub fn total_balance(&self) -> Decimal {
        self.accounts
            .iter()
            .fold(Decimal::ZERO, |acc, a| acc.saturating_add(a.balance))
    }
}

/// A month the user confirmed as matching the bank statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    /// Calendar year.
    pub year: i32,
    /// Month 1-12.
    pub month: u32,
    /// When the user confirmed it.
    pub confirmed_at: DateTime<Utc>,
}

/// Account listed when connecting.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBankAccount {
    /// Display name.
    pub name: String,
    /// Opening balance.
    #[serde(default)]
    pub balance: Decimal,
    /// Currency.
    #[serde(default)]
    pub currency: Currency,
}

/// Input for connecting an institution.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBankConnection {
    /// Required.
    pub institution: String,
    /// Defaults to connected.
    #[serde(default)]
    pub status: BankConnectionStatus,
    /// Accounts at the institution.
    #[serde(default)]
    pub accounts: Vec<NewBankAccount>,
    /// Defaults to now.
    #[serde(default)]
    pub last_sync: Option<DateTime<Utc>>,
}
