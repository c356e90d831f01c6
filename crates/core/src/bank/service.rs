//! Bank operations on the finance state.

use barrkeh_shared::types::{BankAccountId, BankConnectionId};
use chrono::{DateTime, Utc};

use super::types::{BankAccount, BankConnection, BankConnectionStatus, NewBankConnection, Reconciliation};
use crate::error::{FinanceError, FinanceResult};
use crate::state::FinanceState;
use crate::tax::DateWindow;

impl FinanceState {
    /// Adds a connection; `last_sync` defaults to `now`.
    pub fn connect_bank(
        &mut self,
        input: NewBankConnection,
        now: DateTime<Utc>,
    ) -> FinanceResult<BankConnection> {
        let institution = input.institution.trim();
        if institution.is_empty() {
            return Err(FinanceError::validation("institution is required"));
        }
        if input.accounts.iter().any(|a| a.name.trim().is_empty()) {
            return Err(FinanceError::validation("bank account name is required"));
        }

        let connection = BankConnection {
            id: BankConnectionId::new(),
            institution: institution.to_string(),
            status: input.status,
            last_sync: Some(input.last_sync.unwrap_or(now)),
            accounts: input
                .accounts
                .into_iter()
                .map(|a| BankAccount {
                    id: BankAccountId::new(),
                    name: a.name.trim().to_string(),
                    balance: a.balance,
                    currency: a.currency,
                    last_updated: now,
                })
                .collect(),
        };
        self.bank_connections.push(connection.clone());
        Ok(connection)
    }

    /// Marks a connection as synced at `now`. No data is fetched.
    pub fn sync_bank(&mut self, id: BankConnectionId, now: DateTime<Utc>) -> FinanceResult<BankConnection> {
        let connection = self
            .bank_connections
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| FinanceError::not_found("bank connection", id))?;
        connection.status = BankConnectionStatus::Connected;
        connection.last_sync = Some(now);
        Ok(connection.clone())
    }

    /// Removes a connection and its cached accounts.
    pub fn disconnect_bank(&mut self, id: BankConnectionId) -> FinanceResult<BankConnection> {
        let index = self
            .bank_connections
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| FinanceError::not_found("bank connection", id))?;
        Ok(self.bank_connections.remove(index))
    }

    /// Records that the user matched `year`-`month` against the bank
    /// statement. Confirming again keeps the first confirmation.
    pub fn confirm_reconciliation(
        &mut self,
        year: i32,
        month: u32,
        now: DateTime<Utc>,
    ) -> FinanceResult<Reconciliation> {
        DateWindow::month(year, month)?;
        if let Some(existing) = self
            .reconciliations
            .iter()
            .find(|r| r.year == year && r.month == month)
        {
            return Ok(existing.clone());
        }
        let reconciliation = Reconciliation {
            year,
            month,
            confirmed_at: now,
        };
        self.reconciliations.push(reconciliation.clone());
        Ok(reconciliation)
    }

    /// Whether `year`-`month` has been confirmed.
    #[must_use]
    pub fn is_reconciled(&self, year: i32, month: u32) -> bool {
        self.reconciliations
            .iter()
            .any(|r| r.year == year && r.month == month)
    }
}
