//! The finance aggregate: every entity list and settings object.
//!
//! `FinanceState` is the unit of persistence (one serialized blob) and the
//! unit of atomicity: each mutating operation either returns `Ok` with the
//! state fully updated or `Err` with the state untouched. Operations that
//! touch several lists (invoice issuance, period close) validate everything
//! before the first write.
//!
//! The operations themselves live next to the domain they belong to
//! (`accounts::chart`, `ledger::service`, `invoice::service`, ...), each as
//! an `impl FinanceState` block.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::accounts::{Account, seed_chart};
use crate::bank::{BankConnection, Reconciliation};
use crate::contacts::{Customer, Supplier};
use crate::documents::Document;
use crate::error::{FinanceError, FinanceResult};
use crate::fiscal::FiscalSettings;
use crate::fixed_assets::AssetItem;
use crate::imports::ImportJob;
use crate::invoice::Invoice;
use crate::ledger::{JournalEntry, JournalLineInput, check_amount, validate_lines};
use crate::subledger::LedgerEntry;
use crate::tax::{TaxProfile, TaxSettings};
use crate::transactions::Transaction;

/// Current layout version of the persisted blob.
pub const STATE_VERSION: u32 = 1;

/// All finance data owned by the single local user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceState {
    /// Blob layout version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Cash-basis income/expense log.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Chart of accounts.
    #[serde(default)]
    pub chart_of_accounts: Vec<Account>,
    /// Journal in insertion order.
    #[serde(default)]
    pub journal_entries: Vec<JournalEntry>,
    /// Debtor/creditor subsidiary ledger.
    #[serde(default)]
    pub ledger_entries: Vec<LedgerEntry>,
    /// Issued invoices.
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    /// Cached bank feeds.
    #[serde(default)]
    pub bank_connections: Vec<BankConnection>,
    /// Months the user confirmed as reconciled against the bank.
    #[serde(default)]
    pub reconciliations: Vec<Reconciliation>,
    /// VAT profile.
    pub tax_profile: TaxProfile,
    /// Tax set-aside settings.
    pub tax_settings: TaxSettings,
    /// Fiscal year, lock date and numbering counters.
    pub fiscal_settings: FiscalSettings,
    /// Supplier contacts.
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    /// Customer contacts.
    #[serde(default)]
    pub customers: Vec<Customer>,
    /// Fixed assets.
    #[serde(default)]
    pub assets: Vec<AssetItem>,
    /// Statement import jobs.
    #[serde(default)]
    pub import_jobs: Vec<ImportJob>,
    /// Document vault.
    #[serde(default)]
    pub documents: Vec<Document>,
}

fn default_version() -> u32 {
    STATE_VERSION
}

impl FinanceState {
    /// Creates a fresh state with the baseline chart and NL tax profile.
    ///
    /// Numbering prefixes carry the year of `today` (`INV-2024-`).
    #[must_use]
    pub fn seeded(today: NaiveDate, tax_settings: TaxSettings) -> Self {
        Self {
            version: STATE_VERSION,
            transactions: Vec::new(),
            chart_of_accounts: seed_chart(),
            journal_entries: Vec::new(),
            ledger_entries: Vec::new(),
            invoices: Vec::new(),
            bank_connections: Vec::new(),
            reconciliations: Vec::new(),
            tax_profile: TaxProfile::default_nl(),
            tax_settings,
            fiscal_settings: FiscalSettings::for_year(today.year()),
            suppliers: Vec::new(),
            customers: Vec::new(),
            assets: Vec::new(),
            import_jobs: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Re-checks the invariants the operations maintain, for a state that
    /// was loaded or imported rather than built through them.
    ///
    /// # Errors
    ///
    /// - `Validation` for an invalid journal entry, tax setting, fiscal
    ///   setting, an amount outside the accepted range or a counter behind
    ///   an issued number
    /// - `UnbalancedEntry` for a journal entry whose sides differ
    /// - `DuplicateAccountCode` when two accounts share a code
    pub fn validate(&self) -> FinanceResult<()> {
        TaxSettings::new(self.tax_settings.set_aside_percent, self.tax_settings.method)?;

        let mut codes = HashSet::new();
        for account in &self.chart_of_accounts {
            if !codes.insert(account.code.as_str()) {
                return Err(FinanceError::DuplicateAccountCode(account.code.clone()));
            }
        }

        for entry in &self.journal_entries {
            let lines: Vec<JournalLineInput> = entry
                .lines
                .iter()
                .map(|line| JournalLineInput {
                    account_id: line.account_id.clone(),
                    debit: line.debit,
                    credit: line.credit,
                    description: None,
                })
                .collect();
            validate_lines(&lines).map_err(|err| match err {
                FinanceError::Validation(message) => {
                    FinanceError::validation(format!("journal entry {}: {message}", entry.id))
                }
                other => other,
            })?;
        }

        for transaction in &self.transactions {
            check_positive(transaction.amount, "transaction amount")?;
        }
        for invoice in &self.invoices {
            check_positive(invoice.amount, "invoice amount")?;
        }
        for entry in &self.ledger_entries {
            if entry.balance < Decimal::ZERO {
                return Err(FinanceError::validation(format!(
                    "ledger entry {} has a negative balance",
                    entry.name
                )));
            }
            check_amount(entry.balance, "ledger balance")?;
        }
        for asset in &self.assets {
            check_positive(asset.value, "asset value")?;
        }

        self.validate_fiscal_settings()
    }

    fn validate_fiscal_settings(&self) -> FinanceResult<()> {
        let fiscal = &self.fiscal_settings;
        if !(1..=12).contains(&fiscal.fiscal_year_start_month) {
            return Err(FinanceError::validation(
                "fiscal year start month must be between 1 and 12",
            ));
        }
        if fiscal.invoice_number_prefix.trim().is_empty()
            || fiscal.expense_ref_prefix.trim().is_empty()
        {
            return Err(FinanceError::validation("numbering prefixes cannot be empty"));
        }
        check_amount(fiscal.opening_equity.abs(), "opening equity")?;

        let last_invoice = highest_sequence(
            self.invoices.iter().map(|i| i.number.as_str()),
            &fiscal.invoice_number_prefix,
        );
        if last_invoice.is_some_and(|last| fiscal.next_invoice_number <= last) {
            return Err(FinanceError::validation(format!(
                "invoice counter {} is not past the last issued number",
                fiscal.next_invoice_number
            )));
        }
        let last_expense = highest_sequence(
            self.transactions.iter().filter_map(|t| t.reference.as_deref()),
            &fiscal.expense_ref_prefix,
        );
        if last_expense.is_some_and(|last| fiscal.next_expense_ref <= last) {
            return Err(FinanceError::validation(format!(
                "expense counter {} is not past the last issued reference",
                fiscal.next_expense_ref
            )));
        }
        Ok(())
    }
}

fn check_positive(amount: Decimal, field: &str) -> FinanceResult<()> {
    if amount <= Decimal::ZERO {
        return Err(FinanceError::validation(format!("{field} must be positive")));
    }
    check_amount(amount, field)
}

/// Largest numeric suffix among `numbers` carrying `prefix`.
fn highest_sequence<'a>(numbers: impl Iterator<Item = &'a str>, prefix: &str) -> Option<u32> {
    numbers
        .filter_map(|number| number.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
}
