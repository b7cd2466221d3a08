//! Statement error types.

use tally_shared::AppError;
use thiserror::Error;

use crate::accounts::StatementCategory;

/// A statement figure cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    /// The total of a section leaves the decimal range.
    #[error("{category:?} section total overflows the amount range")]
    SectionOverflow {
        /// The section whose total overflowed.
        category: StatementCategory,
    },

    /// Net profit leaves the decimal range.
    #[error("Net profit overflows the amount range")]
    NetProfitOverflow,
}

impl StatementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SectionOverflow { .. } => "SECTION_OVERFLOW",
            Self::NetProfitOverflow => "NET_PROFIT_OVERFLOW",
        }
    }
}

impl From<StatementError> for AppError {
    fn from(err: StatementError) -> Self {
        Self::Validation(err.to_string())
    }
}
