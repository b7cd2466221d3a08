//! Core ledger logic for Tally.
//!
//! This crate contains pure business logic with ZERO storage dependencies.
//! Storage is reached through the provider traits each module defines.
//!
//! # Modules
//!
//! - `accounts` - Chart of accounts, typical balances, statement categories
//! - `fiscal` - Accounting periods
//! - `ledger` - Documents, validation, and the posting accumulator
//! - `hierarchy` - Bottom-up rollup of balances through the account tree
//! - `statements` - General balance and income statement classification
//! - `reports` - Trial balance and the report service

pub mod accounts;
pub mod context;
pub mod fiscal;
pub mod hierarchy;
pub mod ledger;
pub mod reports;
pub mod statements;

pub use context::LedgerContext;

#[cfg(test)]
mod test_support;
