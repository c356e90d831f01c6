//! Fiscal settings and the period lock.
//!
//! The lock date is a single cutoff: every date on or before it belongs to
//! a closed period. It only moves forward through [`FiscalSettings::lock`];
//! reopening is a separate, audited [`FiscalSettings::unlock`].

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::ledger::check_amount;
use crate::tax::DateWindow;

/// Whether a date can still receive postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodState {
    /// Postings accepted.
    Open,
    /// On or before the lock date.
    Locked,
}

/// Kind of lock change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockAction {
    /// Lock date set or moved forward.
    Lock,
    /// Lock date cleared.
    Unlock,
}

/// Audit record of a lock change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockEvent {
    /// What happened.
    pub action: LockAction,
    /// New lock date for `Lock`, the cleared date for `Unlock`.
    pub lock_date: NaiveDate,
    /// Why the period was reopened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// When the change was made.
    pub at: DateTime<Utc>,
}

/// Counters stop here. A counter equal to this value can no longer be
/// consumed.
pub const MAX_SEQUENCE: u32 = u32::MAX;

/// Fiscal year start, opening balance, lock date and sequence counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalSettings {
    /// Month the fiscal year starts in (1-12).
    pub fiscal_year_start_month: u32,
    /// Owner equity at the opening date.
    pub opening_equity: Decimal,
    /// Date the books were opened.
    pub opening_date: NaiveDate,
    /// Postings dated on or before this date are rejected.
    #[serde(default)]
    pub lock_date: Option<NaiveDate>,
    /// Prefix for invoice numbers, e.g. `INV-2024-`.
    pub invoice_number_prefix: String,
    /// Next invoice sequence number.
    pub next_invoice_number: u32,
    /// Prefix for expense references, e.g. `EXP-2024-`.
    pub expense_ref_prefix: String,
    /// Next expense sequence number.
    pub next_expense_ref: u32,
    /// Every lock and unlock, oldest first.
    #[serde(default)]
    pub lock_history: Vec<LockEvent>,
}

impl FiscalSettings {
    /// Calendar-year defaults for a book opened in `year`.
    #[must_use]
    pub fn for_year(year: i32) -> Self {
        Self {
            fiscal_year_start_month: 1,
            opening_equity: Decimal::ZERO,
            opening_date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default(),
            lock_date: None,
            invoice_number_prefix: format!("INV-{year}-"),
            next_invoice_number: 1,
            expense_ref_prefix: format!("EXP-{year}-"),
            next_expense_ref: 1,
            lock_history: Vec::new(),
        }
    }

    /// True when a lock date is set and `date` is on or before it.
    #[must_use]
    pub fn is_locked(&self, date: NaiveDate) -> bool {
        self.lock_date.is_some_and(|lock_date| date <= lock_date)
    }

    /// Open or locked state of the period containing `date`.
    #[must_use]
    pub fn period_state(&self, date: NaiveDate) -> PeriodState {
        if self.is_locked(date) {
            PeriodState::Locked
        } else {
            PeriodState::Open
        }
    }

    /// Fails with `PeriodLocked` when `date` is in a locked period.
    pub fn ensure_open(&self, date: NaiveDate) -> FinanceResult<()> {
        match self.lock_date {
            Some(lock_date) if date <= lock_date => {
                Err(FinanceError::PeriodLocked { date, lock_date })
            }
            _ => Ok(()),
        }
    }

    /// Sets or advances the lock date.
    ///
    /// Locking to the current lock date again is a no-op.
    ///
    /// # Errors
    ///
    /// `LockDateRegression` when `date` is before the current lock date.
    pub fn lock(&mut self, date: NaiveDate, at: DateTime<Utc>) -> FinanceResult<()> {
        if let Some(current) = self.lock_date {
            if date < current {
                return Err(FinanceError::LockDateRegression {
                    current,
                    requested: date,
                });
            }
            if date == current {
                return Ok(());
            }
        }
        self.lock_date = Some(date);
        self.lock_history.push(LockEvent {
            action: LockAction::Lock,
            lock_date: date,
            reason: None,
            at,
        });
        Ok(())
    }

    /// Clears the lock date and returns the date that was cleared.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank reason or when nothing is locked.
    pub fn unlock(&mut self, reason: &str, at: DateTime<Utc>) -> FinanceResult<NaiveDate> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(FinanceError::validation("unlocking requires a reason"));
        }
        let cleared = self
            .lock_date
            .take()
            .ok_or_else(|| FinanceError::validation("no period is locked"))?;
        self.lock_history.push(LockEvent {
            action: LockAction::Unlock,
            lock_date: cleared,
            reason: Some(reason.to_string()),
            at,
        });
        Ok(cleared)
    }

    /// Invoice number for a sequence value: prefix plus a 3-digit pad.
    #[must_use]
    pub fn format_invoice_number(&self, sequence: u32) -> String {
        format!("{}{sequence:03}", self.invoice_number_prefix)
    }

    /// The invoice number the next issuance will take, without advancing.
    ///
    /// # Errors
    ///
    /// `Validation` when the counter is exhausted.
    pub fn peek_invoice_number(&self) -> FinanceResult<String> {
        if self.next_invoice_number >= MAX_SEQUENCE {
            return Err(FinanceError::validation("invoice numbering is exhausted"));
        }
        Ok(self.format_invoice_number(self.next_invoice_number))
    }

    /// Returns the next invoice number and advances the counter.
    ///
    /// # Errors
    ///
    /// `Validation` when the counter is exhausted; the counter is unchanged.
    pub fn consume_invoice_number(&mut self) -> FinanceResult<String> {
        let number = self.peek_invoice_number()?;
        self.next_invoice_number += 1;
        Ok(number)
    }

    /// Returns the next expense reference and advances the counter.
    ///
    /// # Errors
    ///
    /// `Validation` when the counter is exhausted; the counter is unchanged.
    pub fn consume_expense_ref(&mut self) -> FinanceResult<String> {
        if self.next_expense_ref >= MAX_SEQUENCE {
            return Err(FinanceError::validation("expense numbering is exhausted"));
        }
        let reference = format!("{}{:03}", self.expense_ref_prefix, self.next_expense_ref);
        self.next_expense_ref += 1;
        Ok(reference)
    }

    /// The fiscal year containing `today`, as a half-open window.
    pub fn fiscal_year_window(&self, today: NaiveDate) -> FinanceResult<DateWindow> {
        let start_year = if today.month() >= self.fiscal_year_start_month {
            today.year()
        } else {
            today.year() - 1
        };
        let from = NaiveDate::from_ymd_opt(start_year, self.fiscal_year_start_month, 1)
            .ok_or_else(|| FinanceError::validation("invalid fiscal year start month"))?;
        let to = from
            .checked_add_months(Months::new(12))
            .ok_or_else(|| FinanceError::validation("fiscal year out of range"))?;
        DateWindow::new(from, to)
    }

    /// Validates and merges a patch.
    ///
    /// # Errors
    ///
    /// `Validation` for a start month outside 1-12, a blank prefix, a counter
    /// moved backward, or any attempt to set the lock date here.
    pub fn apply(&mut self, patch: FiscalSettingsPatch) -> FinanceResult<()> {
        if patch.lock_date.is_some() {
            return Err(FinanceError::validation(
                "the lock date changes only through lock and unlock",
            ));
        }
        if let Some(month) = patch.fiscal_year_start_month {
            if !(1..=12).contains(&month) {
                return Err(FinanceError::validation(
                    "fiscal year start month must be between 1 and 12",
                ));
            }
        }
        for prefix in [&patch.invoice_number_prefix, &patch.expense_ref_prefix]
            .into_iter()
            .flatten()
        {
            if prefix.trim().is_empty() {
                return Err(FinanceError::validation("numbering prefixes cannot be empty"));
            }
        }
        if [patch.next_invoice_number, patch.next_expense_ref]
            .into_iter()
            .flatten()
            .any(|n| n >= MAX_SEQUENCE)
        {
            return Err(FinanceError::validation(format!(
                "sequence counters must stay below {MAX_SEQUENCE}"
            )));
        }
        if let Some(equity) = patch.opening_equity {
            check_amount(equity.abs(), "opening equity")?;
        }
        if patch
            .next_invoice_number
            .is_some_and(|n| n < self.next_invoice_number)
        {
            return Err(FinanceError::validation(
                "the invoice counter cannot move backward",
            ));
        }
        if patch
            .next_expense_ref
            .is_some_and(|n| n < self.next_expense_ref)
        {
            return Err(FinanceError::validation(
                "the expense counter cannot move backward",
            ));
        }

        if let Some(month) = patch.fiscal_year_start_month {
            self.fiscal_year_start_month = month;
        }
        if let Some(equity) = patch.opening_equity {
            self.opening_equity = equity;
        }
        if let Some(date) = patch.opening_date {
            self.opening_date = date;
        }
        if let Some(prefix) = patch.invoice_number_prefix {
            self.invoice_number_prefix = prefix;
        }
        if let Some(n) = patch.next_invoice_number {
            self.next_invoice_number = n;
        }
        if let Some(prefix) = patch.expense_ref_prefix {
            self.expense_ref_prefix = prefix;
        }
        if let Some(n) = patch.next_expense_ref {
            self.next_expense_ref = n;
        }
        Ok(())
    }
}

/// Partial update of fiscal settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalSettingsPatch {
    /// New fiscal year start month.
    pub fiscal_year_start_month: Option<u32>,
    /// New opening equity.
    pub opening_equity: Option<Decimal>,
    /// New opening date.
    pub opening_date: Option<NaiveDate>,
    /// Rejected when present.
    pub lock_date: Option<NaiveDate>,
    /// New invoice prefix.
    pub invoice_number_prefix: Option<String>,
    /// New invoice counter (never lower than the current one).
    pub next_invoice_number: Option<u32>,
    /// New expense prefix.
    pub expense_ref_prefix: Option<String>,
    /// New expense counter (never lower than the current one).
    pub next_expense_ref: Option<u32>,
}
