//! Initial balance provider.

use std::collections::HashMap;

use tally_shared::types::AccountId;

use super::types::InitialBalance;
use crate::context::LedgerContext;

/// Read access to the "current" initial balance snapshot.
///
/// The snapshot is replaced as a whole when a period closes.
pub trait SnapshotSource: Send + Sync {
    /// The current initial balance per account.
    fn current(&self, ctx: &LedgerContext) -> HashMap<AccountId, InitialBalance>;

    /// Changes whenever the current snapshot is replaced.
    fn revision(&self, _ctx: &LedgerContext) -> u64 {
        0
    }
}
