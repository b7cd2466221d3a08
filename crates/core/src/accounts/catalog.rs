//! Account hierarchy provider.

use std::sync::Arc;

use tally_shared::types::AccountId;

use super::chart::ChartOfAccounts;
use super::types::Account;
use crate::context::LedgerContext;

/// Read access to an organization's chart of accounts.
///
/// Implemented by the storage layer; the ledger never edits accounts.
pub trait AccountCatalog: Send + Sync {
    /// Returns the indexed chart of accounts.
    fn chart(&self, ctx: &LedgerContext) -> Arc<ChartOfAccounts>;

    /// Looks up a single account.
    fn account(&self, ctx: &LedgerContext, id: AccountId) -> Option<Account> {
        self.chart(ctx).get(&id).cloned()
    }

    /// Changes whenever the organization's chart is replaced.
    fn revision(&self, _ctx: &LedgerContext) -> u64 {
        0
    }
}
