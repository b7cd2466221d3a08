//! Chart of accounts.
//!
//! This module provides:
//! - Account domain types (typical balance, statement category)
//! - The indexed chart used for tree walks and category resolution
//! - The provider trait the storage layer implements

pub mod catalog;
pub mod chart;
pub mod types;

pub use catalog::AccountCatalog;
pub use chart::{Ancestors, ChartOfAccounts};
pub use types::{Account, Movement, StatementCategory, TypicalBalance};
