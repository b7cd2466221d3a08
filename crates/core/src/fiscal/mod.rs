//! Accounting period management.

pub mod catalog;
pub mod period;

pub use catalog::PeriodCatalog;
pub use period::{AccountingPeriod, PeriodStatus};
