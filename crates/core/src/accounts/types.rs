//! Account domain types.

use barrkeh_shared::types::{AccountId, VatRateId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Classification of a ledger account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountType {
    /// Things the business owns.
    Asset,
    /// Things the business owes.
    Liability,
    /// Owner's stake.
    Equity,
    /// Income.
    Revenue,
    /// Costs.
    Expense,
    /// Offsets an asset (e.g. accumulated depreciation).
    ContraAsset,
    /// Offsets a liability.
    ContraLiability,
}

/// Side on which an account's balance grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Asset, expense, contra-liability.
    Debit,
    /// Liability, equity, revenue, contra-asset.
    Credit,
}

impl AccountType {
    /// Returns the side that increases this account.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense | Self::ContraLiability => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue | Self::ContraAsset => {
                NormalBalance::Credit
            }
        }
    }

    /// Net movement on an account of this type.
    ///
    /// Debit-normal: `debit - credit`; credit-normal: `credit - debit`.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self.normal_balance() {
            NormalBalance::Debit => debit - credit,
            NormalBalance::Credit => credit - debit,
        }
    }
}

/// Sales channel an account is dedicated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Etsy shop.
    Etsy,
    /// Own website.
    Website,
    /// Client services.
    Services,
    /// Not channel specific.
    General,
}

/// A chart of accounts entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Identifier referenced by journal lines.
    pub id: AccountId,
    /// Unique account code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Account classification.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Inactive accounts accept no new postings.
    pub is_active: bool,
    /// Default VAT rate for postings to this account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_rate_id: Option<VatRateId>,
    /// Dedicated sales channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
}

/// Input for adding an account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    /// Caller-assigned id; generated when absent.
    #[serde(default)]
    pub id: Option<AccountId>,
    /// Unique account code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Account classification.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to active.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Default VAT rate.
    #[serde(default)]
    pub vat_rate_id: Option<VatRateId>,
    /// Dedicated sales channel.
    #[serde(default)]
    pub channel: Option<Channel>,
}

fn default_active() -> bool {
    true
}

/// Partial update for an account. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPatch {
    /// New code.
    pub code: Option<String>,
    /// New name.
    pub name: Option<String>,
    /// New classification (refused once postings exist).
    #[serde(rename = "type")]
    pub account_type: Option<AccountType>,
    /// New description.
    pub description: Option<String>,
    /// Activate or deactivate.
    pub is_active: Option<bool>,
    /// New VAT rate.
    pub vat_rate_id: Option<VatRateId>,
    /// New channel.
    pub channel: Option<Channel>,
}
