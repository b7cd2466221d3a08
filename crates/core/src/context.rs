//! Explicit per-call context.

use serde::{Deserialize, Serialize};
use tally_shared::types::OrganizationId;

/// Context passed into every ledger and report operation.
///
/// Stores key their rows by the organization, so two organizations never
/// observe each other's balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerContext {
    /// The organization owning the ledger.
    pub organization_id: OrganizationId,
}

impl LedgerContext {
    /// Creates a context for the given organization.
    #[must_use]
    pub const fn new(organization_id: OrganizationId) -> Self {
        Self { organization_id }
    }
}
