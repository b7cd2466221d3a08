//! Report error types.

use tally_shared::AppError;
use tally_shared::types::{AccountId, PeriodId};
use thiserror::Error;

use crate::hierarchy::HierarchyError;
use crate::statements::StatementError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Period not found.
    #[error("Period not found: {0}")]
    PeriodNotFound(PeriodId),

    /// Account not found or not postable.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// The chart of accounts is not a forest.
    #[error("Malformed account hierarchy: {0}")]
    MalformedHierarchy(#[source] HierarchyError),

    /// An aggregated amount leaves the decimal range.
    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    /// Storage layer failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PeriodNotFound(_) => "PERIOD_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::MalformedHierarchy(_) => "MALFORMED_HIERARCHY",
            Self::AmountOverflow(_) => "AMOUNT_OVERFLOW",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<HierarchyError> for ReportError {
    fn from(err: HierarchyError) -> Self {
        if err.is_malformed() {
            Self::MalformedHierarchy(err)
        } else {
            Self::AmountOverflow(err.to_string())
        }
    }
}

impl From<StatementError> for ReportError {
    fn from(err: StatementError) -> Self {
        Self::AmountOverflow(err.to_string())
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::PeriodNotFound(_) | ReportError::AccountNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            ReportError::MalformedHierarchy(inner) => inner.into(),
            ReportError::AmountOverflow(msg) => Self::Validation(msg),
            ReportError::Storage(msg) => Self::Storage(msg),
        }
    }
}
