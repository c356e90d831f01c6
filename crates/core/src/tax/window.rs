//! Half-open reporting windows.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};

/// A `[from, to)` date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// First included date.
    pub from: NaiveDate,
    /// First excluded date.
    pub to: NaiveDate,
}

impl DateWindow {
    /// Builds a window, rejecting `to < from`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> FinanceResult<Self> {
        if to < from {
            return Err(FinanceError::validation(format!(
                "window end {to} is before its start {from}"
            )));
        }
        Ok(Self { from, to })
    }

    /// The calendar month `year-month`.
    pub fn month(year: i32, month: u32) -> FinanceResult<Self> {
        let from = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| FinanceError::validation(format!("invalid month {year}-{month}")))?;
        let to = from
            .checked_add_months(Months::new(1))
            .ok_or_else(|| FinanceError::validation("month out of range"))?;
        Ok(Self { from, to })
    }

    /// The calendar year `year`.
    pub fn year(year: i32) -> FinanceResult<Self> {
        let from = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| FinanceError::validation(format!("invalid year {year}")))?;
        let to = from
            .checked_add_months(Months::new(12))
            .ok_or_else(|| FinanceError::validation("year out of range"))?;
        Ok(Self { from, to })
    }

    /// First of `today`'s month up to and including `today`.
    #[must_use]
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self {
            from: today - Days::new(u64::from(today.day0())),
            to: today + Days::new(1),
        }
    }

    /// January 1st of `today`'s year up to and including `today`.
    #[must_use]
    pub fn year_to_date(today: NaiveDate) -> Self {
        Self {
            from: today - Days::new(u64::from(today.ordinal0())),
            to: today + Days::new(1),
        }
    }

    /// True when `date` is inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date < self.to
    }

    /// Last included date.
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.to.pred_opt().unwrap_or(self.to)
    }
}
