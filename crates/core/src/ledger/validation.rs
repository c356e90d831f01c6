//! Business rule validation for journal lines.

use rust_decimal::Decimal;

use super::entry::JournalLineInput;
use crate::error::{FinanceError, FinanceResult};

/// Largest amount a single line, transaction, invoice or balance may carry.
///
/// One trillion in major units. Aggregates over bounded amounts stay far
/// inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Fails with `Validation` when `amount` exceeds [`MAX_AMOUNT`].
pub fn check_amount(amount: Decimal, field: &str) -> FinanceResult<()> {
    if amount > MAX_AMOUNT {
        return Err(FinanceError::validation(format!(
            "{field} exceeds the maximum of {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

/// Validates a set of journal lines and returns `(total_debit, total_credit)`.
///
/// Rules, checked in order:
/// - at least two lines;
/// - no negative amounts and none above [`MAX_AMOUNT`];
/// - exactly one side of each line is non-zero;
/// - total debits equal total credits.
///
/// # Errors
///
/// `Validation` for the structural rules, `UnbalancedEntry` for the last one.
pub fn validate_lines(lines: &[JournalLineInput]) -> FinanceResult<(Decimal, Decimal)> {
    if lines.len() < 2 {
        return Err(FinanceError::validation(
            "a journal entry needs at least two lines",
        ));
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for (index, line) in lines.iter().enumerate() {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(FinanceError::validation(format!(
                "line {} has a negative amount",
                index + 1
            )));
        }
        if line.debit.is_zero() == line.credit.is_zero() {
            return Err(FinanceError::validation(format!(
                "line {} must have exactly one of debit or credit",
                index + 1
            )));
        }
        if line.debit.max(line.credit) > MAX_AMOUNT {
            return Err(FinanceError::validation(format!(
                "line {} exceeds the maximum of {MAX_AMOUNT}",
                index + 1
            )));
        }
        total_debit = total_debit
            .checked_add(line.debit)
            .ok_or_else(|| FinanceError::validation("debit total out of range"))?;
        total_credit = total_credit
            .checked_add(line.credit)
            .ok_or_else(|| FinanceError::validation("credit total out of range"))?;
    }

    if total_debit != total_credit {
        return Err(FinanceError::UnbalancedEntry {
            debit: total_debit,
            credit: total_credit,
        });
    }

    Ok((total_debit, total_credit))
}
