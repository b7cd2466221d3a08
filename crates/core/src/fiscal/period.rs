//! Accounting period types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_shared::types::PeriodId;

/// Status of an accounting period.
///
/// At most one period per organization is open at a time; the period
/// catalog enforces this, the ledger only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period accepts postings.
    Open,
    /// Period is closed, no new postings allowed.
    Closed,
}

/// An accounting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingPeriod {
    /// Unique identifier.
    pub id: PeriodId,
    /// Period name (e.g., "January 2026").
    pub name: String,
    /// Start date of the period.
    pub start_date: NaiveDate,
    /// End date of the period (inclusive).
    pub end_date: NaiveDate,
    /// Current status.
    pub status: PeriodStatus,
}

impl AccountingPeriod {
    /// Creates an open period.
    #[must_use]
    pub fn open(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: PeriodId::new(),
            name: name.into(),
            start_date,
            end_date,
            status: PeriodStatus::Open,
        }
    }

    /// Returns true if postings can be applied to this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
