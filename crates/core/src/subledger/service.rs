//! Subsidiary ledger operations on the finance state.

use barrkeh_shared::types::LedgerEntryId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::types::{LedgerEntry, LedgerEntryPatch, MovementKind, NewLedgerEntry};
use crate::error::{FinanceError, FinanceResult};
use crate::ledger::check_amount;
use crate::state::FinanceState;

impl FinanceState {
    /// Looks up a ledger entry.
    #[must_use]
    pub fn ledger_entry(&self, id: LedgerEntryId) -> Option<&LedgerEntry> {
        self.ledger_entries.iter().find(|l| l.id == id)
    }

    fn ledger_entry_mut(&mut self, id: LedgerEntryId) -> FinanceResult<&mut LedgerEntry> {
        self.ledger_entries
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| FinanceError::not_found("ledger entry", id))
    }

    /// Opens a counterparty row with an `Opening` movement.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank name or a negative or oversized balance.
    pub fn add_ledger_entry(
        &mut self,
        input: NewLedgerEntry,
        now: DateTime<Utc>,
    ) -> FinanceResult<LedgerEntry> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(FinanceError::validation("name is required"));
        }
        if input.balance < Decimal::ZERO {
            return Err(FinanceError::validation("balance cannot be negative"));
        }
        check_amount(input.balance, "balance")?;

        let mut entry = LedgerEntry {
            id: LedgerEntryId::new(),
            kind: input.kind,
            name: name.to_string(),
            balance: Decimal::ZERO,
            currency: input.currency,
            due_date: input.due_date,
            last_activity: now,
            contact_email: input.contact_email,
            notes: input.notes,
            movements: Vec::new(),
        };
        entry.push_movement(MovementKind::Opening, input.balance, None, now);
        self.ledger_entries.push(entry.clone());
        Ok(entry)
    }

    /// Merges contact fields and refreshes `last_activity`.
    pub fn update_ledger_entry(
        &mut self,
        id: LedgerEntryId,
        patch: LedgerEntryPatch,
        now: DateTime<Utc>,
    ) -> FinanceResult<LedgerEntry> {
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(FinanceError::validation("name is required"));
        }
        let entry = self.ledger_entry_mut(id)?;
        if let Some(name) = patch.name {
            entry.name = name.trim().to_string();
        }
        if patch.due_date.is_some() {
            entry.due_date = patch.due_date;
        }
        if patch.contact_email.is_some() {
            entry.contact_email = patch.contact_email;
        }
        if patch.notes.is_some() {
            entry.notes = patch.notes;
        }
        entry.last_activity = now;
        Ok(entry.clone())
    }

    /// Appends a signed balance change.
    ///
    /// # Errors
    ///
    /// `Validation` for a zero delta or one that would make the balance
    /// negative or push it above the amount ceiling.
    pub fn record_movement(
        &mut self,
        id: LedgerEntryId,
        delta: Decimal,
        memo: Option<String>,
        now: DateTime<Utc>,
    ) -> FinanceResult<LedgerEntry> {
        if delta.is_zero() {
            return Err(FinanceError::validation("movement amount cannot be zero"));
        }
        check_amount(delta.abs(), "movement amount")?;
        let entry = self.ledger_entry_mut(id)?;
        let balance = entry.balance + delta;
        if balance < Decimal::ZERO {
            return Err(FinanceError::validation(format!(
                "movement of {delta} would leave {} with a negative balance",
                entry.name
            )));
        }
        check_amount(balance, "balance")?;
        entry.push_movement(MovementKind::Adjustment, delta, memo, now);
        Ok(entry.clone())
    }

    /// Brings the balance to zero with a `Settlement` movement. Settling an
    /// entry with nothing outstanding changes nothing.
    pub fn settle_ledger_entry(
        &mut self,
        id: LedgerEntryId,
        memo: Option<String>,
        now: DateTime<Utc>,
    ) -> FinanceResult<LedgerEntry> {
        let entry = self.ledger_entry_mut(id)?;
        if !entry.balance.is_zero() {
            let outstanding = entry.balance;
            entry.push_movement(MovementKind::Settlement, -outstanding, memo, now);
        }
        Ok(entry.clone())
    }

    /// Removes an entry created in error.
    ///
    /// # Errors
    ///
    /// `Validation` once the entry has any movement beyond its opening one;
    /// such entries are settled, never deleted.
    pub fn delete_ledger_entry(&mut self, id: LedgerEntryId) -> FinanceResult<LedgerEntry> {
        let index = self
            .ledger_entries
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| FinanceError::not_found("ledger entry", id))?;
        if self.ledger_entries[index].movements.len() > 1 {
            return Err(FinanceError::validation(
                "entries with recorded movements must be settled, not deleted",
            ));
        }
        Ok(self.ledger_entries.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MAX_AMOUNT;
    use crate::subledger::{CounterpartyKind, MovementKind};
    use crate::tax::TaxSettings;
    use barrkeh_shared::types::Currency;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn state() -> FinanceState {
        FinanceState::seeded(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            TaxSettings::default(),
        )
    }

    fn debtor(name: &str, balance: Decimal) -> NewLedgerEntry {
        NewLedgerEntry {
            kind: CounterpartyKind::Debtor,
            name: name.to_string(),
            balance,
            currency: Currency::Eur,
            due_date: None,
            contact_email: None,
            notes: None,
        }
    }

    #[test]
    fn test_add_records_opening_movement() {
        let mut state = state();
        let entry = state.add_ledger_entry(debtor(" Studio Noord ", dec!(250)), Utc::now()).unwrap();
        assert_eq!(entry.name, "Studio Noord");
        assert_eq!(entry.balance, dec!(250));
        assert_eq!(entry.movements.len(), 1);
        assert_eq!(entry.movements[0].kind, MovementKind::Opening);
    }

    #[test]
    fn test_add_validation() {
        let mut state = state();
        assert!(state.add_ledger_entry(debtor("", dec!(1)), Utc::now()).is_err());
        assert!(state.add_ledger_entry(debtor("X", dec!(-1)), Utc::now()).is_err());
        assert!(state.ledger_entries.is_empty());
    }

    #[test]
    fn test_balance_is_fold_of_movements() {
        let mut state = state();
        let entry = state.add_ledger_entry(debtor("Client", dec!(100)), Utc::now()).unwrap();
        state.record_movement(entry.id, dec!(50), Some("extra hours".into()), Utc::now()).unwrap();
        let updated = state.record_movement(entry.id, dec!(-30), None, Utc::now()).unwrap();

        assert_eq!(updated.balance, dec!(120));
        assert_eq!(updated.balance, updated.derived_balance());
        assert!(state.record_movement(entry.id, dec!(-121), None, Utc::now()).is_err());
        assert!(state.record_movement(entry.id, Decimal::ZERO, None, Utc::now()).is_err());
    }

    #[test]
    fn test_balances_stay_under_the_amount_ceiling() {
        let mut state = state();
        assert!(matches!(
            state.add_ledger_entry(debtor("Whale", Decimal::MAX), Utc::now()),
            Err(FinanceError::Validation(_))
        ));

        let entry = state.add_ledger_entry(debtor("Client", MAX_AMOUNT), Utc::now()).unwrap();
        assert!(state.record_movement(entry.id, dec!(0.01), None, Utc::now()).is_err());
        assert!(state.record_movement(entry.id, Decimal::MIN, None, Utc::now()).is_err());
        assert_eq!(state.ledger_entry(entry.id).unwrap().movements.len(), 1);
    }

    #[test]
    fn test_settle_keeps_audit_trail() {
        let mut state = state();
        let entry = state.add_ledger_entry(debtor("Client", dec!(80)), Utc::now()).unwrap();
        let settled = state.settle_ledger_entry(entry.id, None, Utc::now()).unwrap();
        assert_eq!(settled.balance, Decimal::ZERO);
        assert_eq!(settled.movements.len(), 2);
        assert_eq!(settled.movements[1].amount, dec!(-80));

        let again = state.settle_ledger_entry(entry.id, None, Utc::now()).unwrap();
        assert_eq!(again.movements.len(), 2);

        assert!(matches!(
            state.delete_ledger_entry(entry.id),
            Err(FinanceError::Validation(_))
        ));
    }

    #[test]
    fn test_delete_correction() {
        let mut state = state();
        let entry = state.add_ledger_entry(debtor("Typo", dec!(10)), Utc::now()).unwrap();
        state.delete_ledger_entry(entry.id).unwrap();
        assert!(state.ledger_entry(entry.id).is_none());
        assert!(matches!(
            state.delete_ledger_entry(entry.id),
            Err(FinanceError::NotFound { .. })
        ));
    }

    #[test]
    fn test_update_refreshes_last_activity() {
        let mut state = state();
        let created = chrono::TimeZone::with_ymd_and_hms(&Utc, 2024, 1, 1, 9, 0, 0).unwrap();
        let later = chrono::TimeZone::with_ymd_and_hms(&Utc, 2024, 1, 2, 9, 0, 0).unwrap();
        let entry = state.add_ledger_entry(debtor("Client", dec!(10)), created).unwrap();

        let updated = state
            .update_ledger_entry(
                entry.id,
                LedgerEntryPatch {
                    contact_email: Some("ap@client.nl".to_string()),
                    ..LedgerEntryPatch::default()
                },
                later,
            )
            .unwrap();
        assert_eq!(updated.last_activity, later);
        assert_eq!(updated.balance, dec!(10));
    }
}
