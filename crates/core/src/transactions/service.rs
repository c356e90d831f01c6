//! Transaction log operations on the finance state.

use barrkeh_shared::types::TransactionId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::types::{NewTransaction, Transaction, TransactionPatch, TransactionType};
use crate::error::{FinanceError, FinanceResult};
use crate::ledger::check_amount;
use crate::state::FinanceState;

impl FinanceState {
    /// Looks up a transaction.
    #[must_use]
    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Records a cash event. Expenses receive the next expense reference.
    ///
    /// # Errors
    ///
    /// `Validation` for a non-positive amount, a blank category, a stream on
    /// an expense or an unknown account; `PeriodLocked` for a locked date.
    pub fn record_transaction(
        &mut self,
        input: NewTransaction,
        now: DateTime<Utc>,
    ) -> FinanceResult<Transaction> {
        let mut transaction = Transaction {
            id: TransactionId::new(),
            transaction_type: input.transaction_type,
            amount: input.amount,
            currency: input.currency,
            category: input.category.trim().to_string(),
            stream: input.stream,
            counterparty: input.counterparty,
            counterparty_kind: input.counterparty_kind,
            status: input.status,
            account_id: input.account_id,
            description: input.description,
            vat_relevant: input.vat_relevant,
            receipt_id: input.receipt_id,
            reference: None,
            date: input.date,
            created_at: now,
        };
        self.check_transaction(&transaction)?;
        self.fiscal_settings.ensure_open(transaction.date)?;

        if transaction.is_expense() {
            transaction.reference = Some(self.fiscal_settings.consume_expense_ref()?);
        }
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Merges a patch into a transaction.
    ///
    /// Switching to an expense drops the income stream and assigns an
    /// expense reference if the transaction has none yet.
    ///
    /// # Errors
    ///
    /// `NotFound`, `PeriodLocked` when the current or the new date is locked,
    /// and the validation rules of [`Self::record_transaction`].
    pub fn update_transaction(
        &mut self,
        id: TransactionId,
        patch: TransactionPatch,
    ) -> FinanceResult<Transaction> {
        let current = self
            .transaction(id)
            .ok_or_else(|| FinanceError::not_found("transaction", id))?;
        self.fiscal_settings.ensure_open(current.date)?;

        let mut updated = current.clone();
        if let Some(transaction_type) = patch.transaction_type {
            updated.transaction_type = transaction_type;
            if transaction_type == TransactionType::Expense && patch.stream.is_none() {
                updated.stream = None;
            }
        }
        if let Some(amount) = patch.amount {
            updated.amount = amount;
        }
        if let Some(currency) = patch.currency {
            updated.currency = currency;
        }
        if let Some(category) = patch.category {
            updated.category = category.trim().to_string();
        }
        if patch.stream.is_some() {
            updated.stream = patch.stream;
        }
        if patch.counterparty.is_some() {
            updated.counterparty = patch.counterparty;
        }
        if patch.counterparty_kind.is_some() {
            updated.counterparty_kind = patch.counterparty_kind;
        }
        if patch.status.is_some() {
            updated.status = patch.status;
        }
        if patch.account_id.is_some() {
            updated.account_id = patch.account_id;
        }
        if let Some(description) = patch.description {
            updated.description = description;
        }
        if let Some(vat_relevant) = patch.vat_relevant {
            updated.vat_relevant = vat_relevant;
        }
        if patch.receipt_id.is_some() {
            updated.receipt_id = patch.receipt_id;
        }
        if let Some(date) = patch.date {
            updated.date = date;
        }

        self.check_transaction(&updated)?;
        self.fiscal_settings.ensure_open(updated.date)?;
        if updated.is_expense() && updated.reference.is_none() {
            updated.reference = Some(self.fiscal_settings.consume_expense_ref()?);
        }

        let slot = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| FinanceError::not_found("transaction", id))?;
        *slot = updated.clone();
        Ok(updated)
    }

    /// Removes a transaction outside locked periods.
    pub fn delete_transaction(&mut self, id: TransactionId) -> FinanceResult<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| FinanceError::not_found("transaction", id))?;
        self.fiscal_settings.ensure_open(self.transactions[index].date)?;
        Ok(self.transactions.remove(index))
    }

    fn check_transaction(&self, transaction: &Transaction) -> FinanceResult<()> {
        if transaction.amount <= Decimal::ZERO {
            return Err(FinanceError::validation("amount must be positive"));
        }
        check_amount(transaction.amount, "amount")?;
        if transaction.category.is_empty() {
            return Err(FinanceError::validation("category is required"));
        }
        if transaction.is_expense() && transaction.stream.is_some() {
            return Err(FinanceError::validation(
                "only income transactions carry a stream",
            ));
        }
        if let Some(account_id) = &transaction.account_id {
            if self.account(account_id).is_none() {
                return Err(FinanceError::validation(format!(
                    "unknown account {account_id}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::TaxSettings;
    use crate::transactions::IncomeStream;
    use barrkeh_shared::types::Currency;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state() -> FinanceState {
        FinanceState::seeded(date(2024, 1, 1), TaxSettings::default())
    }

    fn input(transaction_type: TransactionType, amount: Decimal, on: NaiveDate) -> NewTransaction {
        NewTransaction {
            transaction_type,
            amount,
            currency: Currency::Eur,
            category: "Product Sales".to_string(),
            stream: None,
            counterparty: None,
            counterparty_kind: None,
            status: None,
            account_id: None,
            description: "Template bundle".to_string(),
            vat_relevant: true,
            receipt_id: None,
            date: on,
        }
    }

    #[test]
    fn test_record_income() {
        let mut state = state();
        let mut new = input(TransactionType::Income, dec!(19.99), date(2024, 3, 1));
        new.stream = Some(IncomeStream::Etsy);
        let recorded = state.record_transaction(new, Utc::now()).unwrap();
        assert_eq!(recorded.stream, Some(IncomeStream::Etsy));
        assert!(recorded.reference.is_none());
        assert_eq!(state.fiscal_settings.next_expense_ref, 1);
    }

    #[test]
    fn test_expense_gets_reference() {
        let mut state = state();
        let first = state
            .record_transaction(input(TransactionType::Expense, dec!(12), date(2024, 3, 1)), Utc::now())
            .unwrap();
        let second = state
            .record_transaction(input(TransactionType::Expense, dec!(8), date(2024, 3, 2)), Utc::now())
            .unwrap();
        assert_eq!(first.reference.as_deref(), Some("EXP-2024-001"));
        assert_eq!(second.reference.as_deref(), Some("EXP-2024-002"));
        assert!(first.receipt_id.is_none());
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let mut state = state();
        assert!(matches!(
            state.record_transaction(input(TransactionType::Income, dec!(0), date(2024, 3, 1)), Utc::now()),
            Err(FinanceError::Validation(_))
        ));
        assert!(matches!(
            state.record_transaction(input(TransactionType::Expense, dec!(-5), date(2024, 3, 1)), Utc::now()),
            Err(FinanceError::Validation(_))
        ));

        let mut blank = input(TransactionType::Income, dec!(5), date(2024, 3, 1));
        blank.category = "  ".to_string();
        assert!(state.record_transaction(blank, Utc::now()).is_err());

        let mut streamed = input(TransactionType::Expense, dec!(5), date(2024, 3, 1));
        streamed.stream = Some(IncomeStream::Website);
        assert!(state.record_transaction(streamed, Utc::now()).is_err());

        assert!(state.transactions.is_empty());
        assert_eq!(state.fiscal_settings.next_expense_ref, 1);
    }

    #[test]
    fn test_locked_period_blocks_writes() {
        let mut state = state();
        let january = state
            .record_transaction(input(TransactionType::Income, dec!(100), date(2024, 1, 5)), Utc::now())
            .unwrap();
        let february = state
            .record_transaction(input(TransactionType::Income, dec!(50), date(2024, 2, 1)), Utc::now())
            .unwrap();
        state.lock_period(date(2024, 1, 31), Utc::now()).unwrap();

        assert!(matches!(
            state.record_transaction(input(TransactionType::Income, dec!(1), date(2024, 1, 20)), Utc::now()),
            Err(FinanceError::PeriodLocked { .. })
        ));
        assert!(matches!(
            state.delete_transaction(january.id),
            Err(FinanceError::PeriodLocked { .. })
        ));
        assert!(matches!(
            state.update_transaction(
                january.id,
                TransactionPatch {
                    amount: Some(dec!(90)),
                    ..TransactionPatch::default()
                }
            ),
            Err(FinanceError::PeriodLocked { .. })
        ));
        // Moving an open transaction into the locked period is refused too.
        assert!(matches!(
            state.update_transaction(
                february.id,
                TransactionPatch {
                    date: Some(date(2024, 1, 30)),
                    ..TransactionPatch::default()
                }
            ),
            Err(FinanceError::PeriodLocked { .. })
        ));
        assert!(state.delete_transaction(february.id).is_ok());
    }

    #[test]
    fn test_update_and_delete() {
        let mut state = state();
        let mut new = input(TransactionType::Income, dec!(40), date(2024, 4, 1));
        new.stream = Some(IncomeStream::Services);
        let recorded = state.record_transaction(new, Utc::now()).unwrap();

        let updated = state
            .update_transaction(
                recorded.id,
                TransactionPatch {
                    transaction_type: Some(TransactionType::Expense),
                    category: Some("Hosting".to_string()),
                    ..TransactionPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.transaction_type, TransactionType::Expense);
        assert!(updated.stream.is_none());
        assert_eq!(updated.created_at, recorded.created_at);
        assert_eq!(updated.reference.as_deref(), Some("EXP-2024-001"));
        assert_eq!(state.fiscal_settings.next_expense_ref, 2);

        state.delete_transaction(recorded.id).unwrap();
        assert!(matches!(
            state.delete_transaction(recorded.id),
            Err(FinanceError::NotFound { .. })
        ));
    }

    #[test]
    fn test_reclassified_expense_keeps_its_reference() {
        let mut state = state();
        let expense = state
            .record_transaction(input(TransactionType::Expense, dec!(30), date(2024, 4, 2)), Utc::now())
            .unwrap();
        let to_type = |transaction_type| TransactionPatch {
            transaction_type: Some(transaction_type),
            ..TransactionPatch::default()
        };

        state
            .update_transaction(expense.id, to_type(TransactionType::Income))
            .unwrap();
        let back = state
            .update_transaction(expense.id, to_type(TransactionType::Expense))
            .unwrap();
        assert_eq!(back.reference, expense.reference);
        assert_eq!(state.fiscal_settings.next_expense_ref, 2);
    }

    #[test]
    fn test_amount_above_maximum_rejected() {
        let mut state = state();
        let huge = input(TransactionType::Income, Decimal::MAX, date(2024, 3, 1));
        assert!(matches!(
            state.record_transaction(huge, Utc::now()),
            Err(FinanceError::Validation(_))
        ));

        let recorded = state
            .record_transaction(input(TransactionType::Income, dec!(10), date(2024, 3, 1)), Utc::now())
            .unwrap();
        let patch = TransactionPatch {
            amount: Some(crate::ledger::MAX_AMOUNT + dec!(1)),
            ..TransactionPatch::default()
        };
        assert!(state.update_transaction(recorded.id, patch).is_err());
        assert_eq!(state.transaction(recorded.id).unwrap().amount, dec!(10));
    }

    #[test]
    fn test_exhausted_expense_counter_leaves_state_untouched() {
        let mut state = state();
        state.fiscal_settings.next_expense_ref = u32::MAX;
        let before = state.clone();

        assert!(matches!(
            state.record_transaction(input(TransactionType::Expense, dec!(5), date(2024, 3, 1)), Utc::now()),
            Err(FinanceError::Validation(_))
        ));
        assert_eq!(state, before);
    }
}
