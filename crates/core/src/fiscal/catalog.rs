//! Period provider.

use tally_shared::types::PeriodId;

use super::period::AccountingPeriod;
use crate::context::LedgerContext;

/// Read access to an organization's accounting periods.
pub trait PeriodCatalog: Send + Sync {
    /// Looks up a period by id.
    fn get(&self, ctx: &LedgerContext, id: PeriodId) -> Option<AccountingPeriod>;

    /// All periods ordered by start date.
    fn all(&self, ctx: &LedgerContext) -> Vec<AccountingPeriod>;

    /// The single open period, if any.
    fn active(&self, ctx: &LedgerContext) -> Option<AccountingPeriod> {
        self.all(ctx).into_iter().find(AccountingPeriod::is_open)
    }
}
