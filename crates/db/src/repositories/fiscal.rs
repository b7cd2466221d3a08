//! Accounting period repository.

use dashmap::DashMap;
use tally_core::LedgerContext;
use tally_core::fiscal::{AccountingPeriod, PeriodCatalog, PeriodStatus};
use tally_shared::types::{OrganizationId, PeriodId};
use thiserror::Error;
use tracing::info;

/// Error types for period operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FiscalError {
    /// Another period is already open.
    #[error("Period {0} is already open")]
    AnotherPeriodOpen(PeriodId),

    /// Period dates overlap an existing period.
    #[error("Period overlaps existing period {0}")]
    Overlapping(PeriodId),

    /// Period ends before it starts.
    #[error("Period ends before it starts")]
    InvalidDateRange,

    /// Period not found.
    #[error("Period not found: {0}")]
    PeriodNotFound(PeriodId),
}

/// In-memory accounting periods per organization.
///
/// Enforces that at most one period per organization is open.
#[derive(Default)]
pub struct InMemoryPeriodCatalog {
    periods: DashMap<OrganizationId, Vec<AccountingPeriod>>,
}

impl InMemoryPeriodCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a period.
    ///
    /// # Errors
    ///
    /// - `InvalidDateRange` if the period ends before it starts
    /// - `Overlapping` if it shares a date with an existing period
    /// - `AnotherPeriodOpen` if it is open while another period is open
    pub fn insert(
        &self,
        ctx: &LedgerContext,
        period: AccountingPeriod,
    ) -> Result<(), FiscalError> {
        if period.end_date < period.start_date {
            return Err(FiscalError::InvalidDateRange);
        }

        let mut periods = self.periods.entry(ctx.organization_id).or_default();
        if let Some(existing) = periods
            .iter()
            .find(|p| p.start_date <= period.end_date && period.start_date <= p.end_date)
        {
            return Err(FiscalError::Overlapping(existing.id));
        }
        if period.is_open()
            && let Some(open) = periods.iter().find(|p| p.is_open())
        {
            return Err(FiscalError::AnotherPeriodOpen(open.id));
        }

        info!(
            organization_id = %ctx.organization_id,
            period_id = %period.id,
            name = %period.name,
            "Period added"
        );
        periods.push(period);
        periods.sort_by_key(|p| p.start_date);
        Ok(())
    }

    /// Closes a period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` if the period does not exist.
    pub fn close(&self, ctx: &LedgerContext, period_id: PeriodId) -> Result<AccountingPeriod, FiscalError> {
        let mut periods = self
            .periods
            .get_mut(&ctx.organization_id)
            .ok_or(FiscalError::PeriodNotFound(period_id))?;
        let period = periods
            .iter_mut()
            .find(|p| p.id == period_id)
            .ok_or(FiscalError::PeriodNotFound(period_id))?;
        period.status = PeriodStatus::Closed;

        info!(organization_id = %ctx.organization_id, period_id = %period_id, "Period closed");
        Ok(period.clone())
    }
}

impl PeriodCatalog for InMemoryPeriodCatalog {
    fn get(&self, ctx: &LedgerContext, id: PeriodId) -> Option<AccountingPeriod> {
        self.periods
            .get(&ctx.organization_id)?
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    fn all(&self, ctx: &LedgerContext) -> Vec<AccountingPeriod> {
        self.periods
            .get(&ctx.organization_id)
            .map(|periods| periods.clone())
            .unwrap_or_default()
    }
}
