//! Double-entry bookkeeping logic.
//!
//! This module implements the posting side of the ledger:
//! - Posting entries (debits and credits)
//! - Documents and their `Draft` → `Posted` state machine
//! - Business rule validation
//! - Per-account, per-period control balances
//! - The posting accumulator and the storage trait it writes through
//! - The ledger service that ties validation, the posted registry and
//!   accumulation together

pub mod accumulator;
pub mod balance;
pub mod document;
pub mod entry;
pub mod error;
pub mod service;
pub mod validation;

#[cfg(test)]
mod accumulator_props;

pub use accumulator::{BalanceStore, PeriodSnapshot, PostingAccumulator};
pub use balance::{AccountPeriodBalance, BalanceDelta};
pub use document::{Document, DocumentKind, DocumentStatus, DocumentTotals};
pub use entry::{Direction, PostingEntry};
pub use error::{ErrorKind, LedgerError};
pub use service::{DocumentRegistry, LedgerService};
pub use validation::{validate_document, validate_entries};
