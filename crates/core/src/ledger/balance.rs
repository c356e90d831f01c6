//! Account balance calculations.
//!
//! Balances are folded from journal lines on demand; nothing is cached on the
//! account. Debit-normal accounts (asset, expense, contra-liability) grow with
//! `debit - credit`, credit-normal accounts with `credit - debit`.

use barrkeh_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use super::entry::JournalEntry;
use crate::accounts::{Account, AccountType};

/// Balance of one account over a set of journal entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    /// The account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Total debit amount.
    pub debit_total: Decimal,
    /// Total credit amount.
    pub credit_total: Decimal,
    /// Net balance on the account's normal side.
    pub balance: Decimal,
}

/// Folds journal lines into one balance per account, in chart order.
///
/// Lines referencing accounts missing from the chart are ignored.
#[must_use]
pub fn account_balances(entries: &[JournalEntry], accounts: &[Account]) -> Vec<AccountBalance> {
    let mut totals: HashMap<&AccountId, (Decimal, Decimal)> = HashMap::new();
    for line in entries.iter().flat_map(|e| e.lines.iter()) {
        let slot = totals.entry(&line.account_id).or_default();
        slot.0 += line.debit;
        slot.1 += line.credit;
    }

    accounts
        .iter()
        .map(|account| {
            let (debit_total, credit_total) =
                totals.get(&account.id).copied().unwrap_or_default();
            AccountBalance {
                account_id: account.id.clone(),
                code: account.code.clone(),
                name: account.name.clone(),
                account_type: account.account_type,
                debit_total,
                credit_total,
                balance: account.account_type.balance_change(debit_total, credit_total),
            }
        })
        .collect()
}

/// One row of a trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalanceRow {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Net debit balance, zero when the account nets to credit.
    pub debit: Decimal,
    /// Net credit balance, zero when the account nets to debit.
    pub credit: Decimal,
}

/// Trial balance over the whole journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialBalance {
    /// Accounts with a non-zero net balance.
    pub rows: Vec<TrialBalanceRow>,
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
    /// Whether the two columns agree.
    pub is_balanced: bool,
}

/// Builds the trial balance from journal lines.
#[must_use]
pub fn trial_balance(entries: &[JournalEntry], accounts: &[Account]) -> TrialBalance {
    let rows: Vec<TrialBalanceRow> = account_balances(entries, accounts)
        .into_iter()
        .filter_map(|b| {
            let net = b.debit_total - b.credit_total;
            if net.is_zero() {
                return None;
            }
            let (debit, credit) = if net > Decimal::ZERO {
                (net, Decimal::ZERO)
            } else {
                (Decimal::ZERO, -net)
            };
            Some(TrialBalanceRow {
                code: b.code,
                name: b.name,
                debit,
                credit,
            })
        })
        .collect();

    let total_debit: Decimal = rows.iter().map(|r| r.debit).sum();
    let total_credit: Decimal = rows.iter().map(|r| r.credit).sum();
    TrialBalance {
        rows,
        total_debit,
        total_credit,
        is_balanced: total_debit == total_credit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::seed_chart;
    use crate::ledger::{JournalLineInput, JournalSource};
    use barrkeh_shared::types::JournalEntryId;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn entry(lines: Vec<JournalLineInput>) -> JournalEntry {
        JournalEntry {
            id: JournalEntryId::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            description: "test".to_string(),
            lines: lines.into_iter().map(JournalLineInput::into_line).collect(),
            source: JournalSource::Manual,
            reference: None,
            locked: false,
        }
    }

    fn balance_of<'a>(balances: &'a [AccountBalance], code: &str) -> &'a AccountBalance {
        balances.iter().find(|b| b.code == code).unwrap()
    }

    #[test]
    fn test_balances_follow_normal_side() {
        let chart = seed_chart();
        let entries = vec![
            entry(vec![
                JournalLineInput::debit("1100", dec!(500)),
                JournalLineInput::credit("3000", dec!(500)),
            ]),
            entry(vec![
                JournalLineInput::debit("5400", dec!(12.99)),
                JournalLineInput::credit("1100", dec!(12.99)),
            ]),
        ];

        let balances = account_balances(&entries, &chart);
        assert_eq!(balances.len(), chart.len());
        assert_eq!(balance_of(&balances, "1100").balance, dec!(487.01));
        assert_eq!(balance_of(&balances, "3000").balance, dec!(500));
        assert_eq!(balance_of(&balances, "5400").balance, dec!(12.99));
        assert_eq!(balance_of(&balances, "4000").balance, Decimal::ZERO);
    }

    #[test]
    fn test_trial_balance_agrees() {
        let chart = seed_chart();
        let entries = vec![
            entry(vec![
                JournalLineInput::debit("1200", dec!(250)),
                JournalLineInput::credit("4020", dec!(250)),
            ]),
            entry(vec![
                JournalLineInput::debit("1100", dec!(250)),
                JournalLineInput::credit("1200", dec!(250)),
            ]),
        ];

        let trial = trial_balance(&entries, &chart);
        assert!(trial.is_balanced);
        assert_eq!(trial.total_debit, dec!(250));
        // Accounts receivable nets to zero and drops out.
        assert_eq!(trial.rows.len(), 2);
    }
}
