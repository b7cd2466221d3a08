//! Financial report generation.
//!
//! This module provides:
//! - Trial Balance (initial, period and final columns per postable account)
//! - The report service composing trial balance, general balance and
//!   income statement over the storage providers
//! - Report caching keyed by store revision

pub mod cache;
pub mod error;
pub mod service;
pub mod snapshot;
pub mod trial_balance;
pub mod types;


pub use cache::{ReportCache, ReportKey, ReportKind};
pub use error::ReportError;
pub use service::{ReportService, ReportSettings};
pub use snapshot::SnapshotSource;
pub use trial_balance::TrialBalanceCalculator;
pub use types::{
    DebitCredit, InitialBalance, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
