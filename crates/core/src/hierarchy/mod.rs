//! Bottom-up aggregation of balances through the chart of accounts.

pub mod error;
pub mod rollup;

#[cfg(test)]
mod rollup_props;

pub use error::HierarchyError;
pub use rollup::HierarchyRollup;
