//! Baseline chart and registry operations.

use barrkeh_shared::types::AccountId;

use super::types::{Account, AccountPatch, AccountType, Channel, NewAccount};
use crate::error::{FinanceError, FinanceResult};
use crate::state::FinanceState;

/// Bank - Operating.
pub const BANK_OPERATING: &str = "1100";
/// Accounts Receivable.
pub const ACCOUNTS_RECEIVABLE: &str = "1200";
/// Accounts Payable.
pub const ACCOUNTS_PAYABLE: &str = "2000";
/// Owner Equity.
pub const OWNER_EQUITY: &str = "3000";
/// Services Revenue, credited by invoice issuance.
pub const SERVICES_REVENUE: &str = "4020";

/// Returns the minimal NL-style chart every fresh store starts with.
#[must_use]
pub fn seed_chart() -> Vec<Account> {
    let account = |code: &str, name: &str, account_type, channel| Account {
        id: AccountId::new(code),
        code: code.to_string(),
        name: name.to_string(),
        account_type,
        description: None,
        is_active: true,
        vat_rate_id: None,
        channel,
    };

    vec![
        account("1000", "Cash - Operating", AccountType::Asset, None),
        account(BANK_OPERATING, "Bank - Operating", AccountType::Asset, None),
        account(ACCOUNTS_RECEIVABLE, "Accounts Receivable", AccountType::Asset, None),
        account(ACCOUNTS_PAYABLE, "Accounts Payable", AccountType::Liability, None),
        account("2100", "VAT Payable", AccountType::Liability, None),
        account(OWNER_EQUITY, "Owner Equity", AccountType::Equity, None),
        account("4000", "Sales - Etsy", AccountType::Revenue, Some(Channel::Etsy)),
        account("4010", "Sales - Website", AccountType::Revenue, Some(Channel::Website)),
        account(SERVICES_REVENUE, "Services Revenue", AccountType::Revenue, Some(Channel::Services)),
        account("5000", "Software & Tools", AccountType::Expense, None),
        account("5100", "Advertising", AccountType::Expense, None),
        account("5200", "Education", AccountType::Expense, None),
        account("5300", "Professional Fees", AccountType::Expense, None),
        account("5400", "Hosting & Domains", AccountType::Expense, None),
    ]
}

impl FinanceState {
    /// Looks up an account by id.
    #[must_use]
    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.chart_of_accounts.iter().find(|a| &a.id == id)
    }

    /// Looks up an account by code.
    #[must_use]
    pub fn account_by_code(&self, code: &str) -> Option<&Account> {
        self.chart_of_accounts.iter().find(|a| a.code == code)
    }

    /// Returns the account if it exists and accepts postings.
    pub fn postable_account(&self, id: &AccountId) -> FinanceResult<&Account> {
        let account = self
            .account(id)
            .ok_or_else(|| FinanceError::not_found("account", id))?;
        if !account.is_active {
            return Err(FinanceError::AccountInactive(id.clone()));
        }
        Ok(account)
    }

    /// Returns true if any journal line references the account.
    #[must_use]
    pub fn account_has_postings(&self, id: &AccountId) -> bool {
        self.journal_entries
            .iter()
            .any(|entry| entry.lines.iter().any(|line| &line.account_id == id))
    }

    /// Appends an account to the chart.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank code/name or an id already in use,
    /// `DuplicateAccountCode` when the code is taken.
    pub fn add_account(&mut self, input: NewAccount) -> FinanceResult<Account> {
        let code = input.code.trim().to_string();
        let name = input.name.trim().to_string();
        if code.is_empty() {
            return Err(FinanceError::validation("account code is required"));
        }
        if name.is_empty() {
            return Err(FinanceError::validation("account name is required"));
        }
        if self.account_by_code(&code).is_some() {
            return Err(FinanceError::DuplicateAccountCode(code));
        }

        let id = input.id.unwrap_or_else(AccountId::generate);
        if self.account(&id).is_some() {
            return Err(FinanceError::validation(format!(
                "account id {id} is already in use"
            )));
        }

        let account = Account {
            id,
            code,
            name,
            account_type: input.account_type,
            description: input.description,
            is_active: input.is_active,
            vat_rate_id: input.vat_rate_id,
            channel: input.channel,
        };
        self.chart_of_accounts.push(account.clone());
        Ok(account)
    }

    /// Merges a patch into an account.
    ///
    /// # Errors
    ///
    /// `NotFound`, `DuplicateAccountCode`, or `AccountTypeChangeNotAllowed`
    /// when the type changes on an account that already has postings.
    pub fn update_account(&mut self, id: &AccountId, patch: AccountPatch) -> FinanceResult<Account> {
        let current = self
            .account(id)
            .ok_or_else(|| FinanceError::not_found("account", id))?
            .clone();

        if let Some(code) = patch.code.as_deref().map(str::trim) {
            if code.is_empty() {
                return Err(FinanceError::validation("account code is required"));
            }
            if code != current.code && self.account_by_code(code).is_some() {
                return Err(FinanceError::DuplicateAccountCode(code.to_string()));
            }
        }
        if let Some(account_type) = patch.account_type {
            if account_type != current.account_type && self.account_has_postings(id) {
                return Err(FinanceError::AccountTypeChangeNotAllowed(id.clone()));
            }
        }
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(FinanceError::validation("account name is required"));
        }

        let account = self
            .chart_of_accounts
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| FinanceError::not_found("account", id))?;

        if let Some(code) = patch.code {
            account.code = code.trim().to_string();
        }
        if let Some(name) = patch.name {
            account.name = name.trim().to_string();
        }
        if let Some(account_type) = patch.account_type {
            account.account_type = account_type;
        }
        if let Some(description) = patch.description {
            account.description = Some(description);
        }
        if let Some(is_active) = patch.is_active {
            account.is_active = is_active;
        }
        if let Some(vat_rate_id) = patch.vat_rate_id {
            account.vat_rate_id = Some(vat_rate_id);
        }
        if let Some(channel) = patch.channel {
            account.channel = Some(channel);
        }
        Ok(account.clone())
    }
}
