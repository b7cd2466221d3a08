//! Posted document registry.

use dashmap::DashSet;
use tally_core::LedgerContext;
use tally_core::ledger::DocumentRegistry;
use tally_shared::types::{DocumentId, OrganizationId};

/// In-memory set of posted documents per organization.
///
/// `claim` is a single atomic insert, so of two racing postings of the same
/// document exactly one wins.
#[derive(Default)]
pub struct InMemoryDocumentRegistry {
    posted: DashSet<(OrganizationId, DocumentId)>,
}

impl InMemoryDocumentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of posted documents across every organization.
    #[must_use]
    pub fn len(&self) -> usize {
        self.posted.len()
    }

    /// Returns true if nothing has been posted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posted.is_empty()
    }
}

impl DocumentRegistry for InMemoryDocumentRegistry {
    fn claim(&self, ctx: &LedgerContext, document_id: DocumentId) -> bool {
        self.posted.insert((ctx.organization_id, document_id))
    }

    fn release(&self, ctx: &LedgerContext, document_id: DocumentId) {
        self.posted.remove(&(ctx.organization_id, document_id));
    }

    fn is_posted(&self, ctx: &LedgerContext, document_id: DocumentId) -> bool {
        self.posted.contains(&(ctx.organization_id, document_id))
    }
}
