//! Ledger error types for validation and state errors.
//!
//! Every error is local to the operation that raised it. Validation errors
//! are raised before any balance row is touched.

use rust_decimal::Decimal;
use tally_shared::AppError;
use tally_shared::types::{AccountId, DocumentId, PeriodId};
use thiserror::Error;

use super::entry::Direction;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Document has no entries.
    #[error("Document has no entries")]
    EmptyDocument,

    /// Document must have at least 2 entries.
    #[error("Document must have at least 2 entries")]
    InsufficientEntries,

    /// Entry amount cannot be negative.
    #[error("Entry amount cannot be negative: {amount} on account {account_id}")]
    NegativeAmount {
        /// The account of the offending entry.
        account_id: AccountId,
        /// The offending amount.
        amount: Decimal,
    },

    /// A debit or credit sum exceeds the representable amount range.
    #[error("{0:?} total overflows the supported amount range")]
    AmountOverflow(Direction),

    /// Document is not balanced (debits != credits).
    #[error("Document is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedDocument {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// An entry belongs to a different period than its document.
    #[error("Entry period {found} does not match document period {expected}")]
    PeriodMismatch {
        /// The document's period.
        expected: PeriodId,
        /// The entry's period.
        found: PeriodId,
    },

    /// Document has already been posted.
    #[error("Document {0} has already been posted")]
    AlreadyPosted(DocumentId),

    /// Period is closed, no posting allowed.
    #[error("Period {0} is closed, no posting allowed")]
    PeriodClosed(PeriodId),

    /// Account does not allow direct posting.
    #[error("Account {0} does not allow direct posting")]
    AccountNoDirectPosting(AccountId),

    // ========== Not Found Errors ==========
    /// Account is not part of the chart of accounts.
    #[error("Unknown account: {0}")]
    UnknownAccount(AccountId),

    /// Period not found.
    #[error("Period not found: {0}")]
    PeriodNotFound(PeriodId),

    // ========== Storage Errors ==========
    /// Storage layer failure; nothing was applied.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Coarse error taxonomy shared by ledger and report operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected input; the caller may resubmit corrected input.
    Validation,
    /// Referenced account or period does not exist.
    NotFound,
    /// The chart of accounts is not a tree.
    MalformedHierarchy,
    /// Storage failure.
    Storage,
}

impl LedgerError {
    /// Returns the taxonomy bucket of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyDocument
            | Self::InsufficientEntries
            | Self::NegativeAmount { .. }
            | Self::AmountOverflow(_)
            | Self::UnbalancedDocument { .. }
            | Self::PeriodMismatch { .. }
            | Self::AlreadyPosted(_)
            | Self::PeriodClosed(_)
            | Self::AccountNoDirectPosting(_) => ErrorKind::Validation,
            Self::UnknownAccount(_) | Self::PeriodNotFound(_) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDocument => "EMPTY_DOCUMENT",
            Self::InsufficientEntries => "INSUFFICIENT_ENTRIES",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::AmountOverflow(_) => "AMOUNT_OVERFLOW",
            Self::UnbalancedDocument { .. } => "UNBALANCED_DOCUMENT",
            Self::PeriodMismatch { .. } => "PERIOD_MISMATCH",
            Self::AlreadyPosted(_) => "ALREADY_POSTED",
            Self::PeriodClosed(_) => "PERIOD_CLOSED",
            Self::AccountNoDirectPosting(_) => "ACCOUNT_NO_DIRECT_POSTING",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err.kind() {
            ErrorKind::Validation => Self::Validation(err.to_string()),
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
            ErrorKind::MalformedHierarchy => Self::MalformedHierarchy(err.to_string()),
            ErrorKind::Storage => Self::Storage(err.to_string()),
        }
    }
}
