//! Finance error types for validation and state errors.
//!
//! Every failure is local to one operation: the state the operation was
//! applied to is left untouched and the caller may retry with corrected
//! input.

use barrkeh_shared::types::{AccountId, JournalEntryId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using `FinanceError`.
pub type FinanceResult<T> = Result<T, FinanceError>;

/// Errors that can occur during finance operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinanceError {
    // ========== Validation Errors ==========
    /// Input failed validation (non-positive amount, missing field, range).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Journal entry is not balanced (debits != credits).
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    // ========== Period / Lock Errors ==========
    /// The date falls on or before the fiscal lock date.
    #[error("Period is locked: {date} is on or before lock date {lock_date}")]
    PeriodLocked {
        /// Date the caller tried to write.
        date: NaiveDate,
        /// Current lock date.
        lock_date: NaiveDate,
    },

    /// The lock date may only move forward.
    #[error("Lock date cannot move backward from {current} to {requested}; unlock first")]
    LockDateRegression {
        /// Current lock date.
        current: NaiveDate,
        /// Requested lock date.
        requested: NaiveDate,
    },

    /// Journal entry has been locked and is immutable.
    #[error("Journal entry {0} is locked")]
    EntryLocked(JournalEntryId),

    // ========== Account Errors ==========
    /// Account code already used by another account.
    #[error("Account code {0} is already in use")]
    DuplicateAccountCode(String),

    /// Account is inactive and cannot receive postings.
    #[error("Account {0} is inactive")]
    AccountInactive(AccountId),

    /// Account type cannot change once journal lines reference it.
    #[error("Cannot change account type for account {0} because it has journal lines")]
    AccountTypeChangeNotAllowed(AccountId),

    // ========== Lookup / State Errors ==========
    /// Referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. "invoice".
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// Status change not permitted from the current state.
    #[error("Cannot move {entity} from {from} to {to}")]
    InvalidTransition {
        /// Entity kind.
        entity: &'static str,
        /// Current state.
        from: String,
        /// Requested state.
        to: String,
    },

    // ========== Export Errors ==========
    /// A report could not be rendered.
    #[error("Export failed: {0}")]
    Export(String),

    // ========== Concurrency Errors ==========
    /// An invoice with this number already exists.
    #[error("Invoice number {0} is already taken, please retry")]
    DuplicateInvoiceNumber(String),
}

impl FinanceError {
    /// Shorthand for a validation error.
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Shorthand for a not-found error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::PeriodLocked { .. } => "PERIOD_LOCKED",
            Self::LockDateRegression { .. } => "LOCK_DATE_REGRESSION",
            Self::EntryLocked(_) => "ENTRY_LOCKED",
            Self::DuplicateAccountCode(_) => "DUPLICATE_ACCOUNT_CODE",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::AccountTypeChangeNotAllowed(_) => "ACCOUNT_TYPE_CHANGE_NOT_ALLOWED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::DuplicateInvoiceNumber(_) => "DUPLICATE_INVOICE_NUMBER",
            Self::Export(_) => "EXPORT_FAILED",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::Validation(_)
            | Self::UnbalancedEntry { .. }
            | Self::AccountInactive(_)
            | Self::InvalidTransition { .. } => 400,

            // 404 Not Found
            Self::NotFound { .. } => 404,

            // 409 Conflict - state conflicts
            Self::PeriodLocked { .. }
            | Self::LockDateRegression { .. }
            | Self::EntryLocked(_)
            | Self::DuplicateAccountCode(_)
            | Self::AccountTypeChangeNotAllowed(_)
            | Self::DuplicateInvoiceNumber(_) => 409,

            // 500 Internal Server Error
            Self::Export(_) => 500,
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::DuplicateInvoiceNumber(_))
    }
}
