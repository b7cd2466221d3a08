//! Initial balance snapshot repository.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use tally_core::LedgerContext;
use tally_core::reports::{InitialBalance, SnapshotSource};
use tally_shared::types::{AccountId, OrganizationId};
use tracing::info;

#[derive(Default)]
struct Current {
    revision: u64,
    balances: Arc<HashMap<AccountId, InitialBalance>>,
}

/// In-memory "current" initial balance snapshot per organization.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    current: DashMap<OrganizationId, Current>,
}

impl InMemorySnapshotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current snapshot and bumps its revision.
    pub fn publish(&self, ctx: &LedgerContext, balances: HashMap<AccountId, InitialBalance>) {
        let mut current = self.current.entry(ctx.organization_id).or_default();
        current.revision += 1;
        current.balances = Arc::new(balances);

        info!(
            organization_id = %ctx.organization_id,
            revision = current.revision,
            accounts = current.balances.len(),
            "Initial balance snapshot published"
        );
    }
}

impl SnapshotSource for InMemorySnapshotStore {
    fn current(&self, ctx: &LedgerContext) -> HashMap<AccountId, InitialBalance> {
        self.current
            .get(&ctx.organization_id)
            .map(|current| current.balances.as_ref().clone())
            .unwrap_or_default()
    }

    fn revision(&self, ctx: &LedgerContext) -> u64 {
        self.current
            .get(&ctx.organization_id)
            .map_or(0, |current| current.revision)
    }
}
