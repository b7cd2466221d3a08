//! Chart of accounts repository.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use tally_core::LedgerContext;
use tally_core::accounts::{Account, AccountCatalog, ChartOfAccounts};
use tally_core::hierarchy::{HierarchyError, HierarchyRollup};
use tally_shared::types::OrganizationId;
use tracing::info;

struct LoadedChart {
    revision: u64,
    chart: Arc<ChartOfAccounts>,
}

/// In-memory chart of accounts per organization.
///
/// A chart is replaced as a whole; readers keep the `Arc` they obtained.
/// Every load bumps the organization's chart revision.
#[derive(Default)]
pub struct InMemoryAccountCatalog {
    charts: DashMap<OrganizationId, LoadedChart>,
}

impl InMemoryAccountCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces an organization's chart after checking it forms a forest.
    ///
    /// # Errors
    ///
    /// Returns the `HierarchyError` of the first dangling parent or cycle;
    /// the previous chart stays in place.
    pub fn load(&self, ctx: &LedgerContext, accounts: Vec<Account>) -> Result<(), HierarchyError> {
        let chart = ChartOfAccounts::new(accounts);
        HierarchyRollup::roll_up_chart(&chart, &HashMap::new())?;
        self.load_unchecked(ctx, chart);
        Ok(())
    }

    /// Replaces an organization's chart without validation.
    ///
    /// Legacy imports go through here; a malformed tree then surfaces on the
    /// first report that rolls it up.
    pub fn load_unchecked(&self, ctx: &LedgerContext, chart: ChartOfAccounts) {
        let accounts = chart.len();
        let mut entry = self.charts.entry(ctx.organization_id).or_insert_with(|| LoadedChart {
            revision: 0,
            chart: Arc::default(),
        });
        entry.revision += 1;
        entry.chart = Arc::new(chart);

        info!(
            organization_id = %ctx.organization_id,
            accounts,
            revision = entry.revision,
            "Chart of accounts loaded"
        );
    }
}

impl AccountCatalog for InMemoryAccountCatalog {
    fn chart(&self, ctx: &LedgerContext) -> Arc<ChartOfAccounts> {
        self.charts
            .get(&ctx.organization_id)
            .map(|loaded| Arc::clone(&loaded.chart))
            .unwrap_or_default()
    }

    fn revision(&self, ctx: &LedgerContext) -> u64 {
        self.charts
            .get(&ctx.organization_id)
            .map_or(0, |loaded| loaded.revision)
    }
}
