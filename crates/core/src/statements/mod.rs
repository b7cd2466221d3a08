//! Financial statements.
//!
//! Classification walks each account's ancestors (self first) to find its
//! statement category, then builds the general balance and the income
//! statement from direct and rolled-up balances.

pub mod classifier;
pub mod error;
pub mod types;

pub use classifier::StatementClassifier;
pub use error::StatementError;
pub use types::{
    AccountRef, GeneralBalance, IncomeStatement, StatementLine, StatementSection,
    UncategorizedAccount,
};
