//! Malformed hierarchy errors.

use tally_shared::AppError;
use tally_shared::types::AccountId;
use thiserror::Error;

/// The parent-pointer map does not describe a forest, or a subtree total
/// cannot be represented.
///
/// Every variant carries the offending account id. A rollup that hits any
/// of these aborts without producing partial totals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// An account points at a parent that is not part of the hierarchy.
    #[error("Account {account_id} references missing parent {parent_id}")]
    DanglingParent {
        /// The account holding the reference.
        account_id: AccountId,
        /// The missing parent.
        parent_id: AccountId,
    },

    /// An account is its own ancestor.
    #[error("Account {account_id} is part of a cycle")]
    Cycle {
        /// The smallest account id on the cycle.
        account_id: AccountId,
    },

    /// A balance is attached to an account outside the hierarchy.
    #[error("Balance attached to unknown account {0}")]
    UnknownAccount(AccountId),

    /// The subtree total of an account leaves the decimal range.
    #[error("Rolled-up total of account {account_id} overflows the amount range")]
    Overflow {
        /// The account whose total overflowed.
        account_id: AccountId,
    },
}

impl HierarchyError {
    /// The account the error is about.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        match self {
            Self::DanglingParent { account_id, .. }
            | Self::Cycle { account_id }
            | Self::Overflow { account_id } => *account_id,
            Self::UnknownAccount(account_id) => *account_id,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DanglingParent { .. } => "DANGLING_PARENT",
            Self::Cycle { .. } => "HIERARCHY_CYCLE",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::Overflow { .. } => "ROLLUP_OVERFLOW",
        }
    }

    /// Returns true if the hierarchy itself is broken rather than its amounts.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Self::Overflow { .. })
    }
}

impl From<HierarchyError> for AppError {
    fn from(err: HierarchyError) -> Self {
        if err.is_malformed() {
            Self::MalformedHierarchy(err.to_string())
        } else {
            Self::Validation(err.to_string())
        }
    }
}
