//! Ledger service for document validation and posting.
//!
//! The service owns the `Draft` → `Posted` transition. It runs every check
//! before touching storage, claims the document in the posted registry and
//! only then hands the entries to the [`PostingAccumulator`].

use tally_shared::types::DocumentId;
use tracing::info;

use super::accumulator::{BalanceStore, PostingAccumulator};
use super::document::{Document, DocumentStatus, DocumentTotals};
use super::error::LedgerError;
use super::validation::validate_document;
use crate::accounts::AccountCatalog;
use crate::context::LedgerContext;
use crate::fiscal::PeriodCatalog;

/// Set of documents that have been applied to the ledger.
///
/// `claim` must be atomic: of two racing claims for the same id, exactly
/// one returns `true`.
pub trait DocumentRegistry: Send + Sync {
    /// Marks a document as posted. Returns `false` if it already was.
    fn claim(&self, ctx: &LedgerContext, document_id: DocumentId) -> bool;

    /// Undoes a claim whose posting failed.
    fn release(&self, ctx: &LedgerContext, document_id: DocumentId);

    /// Returns true if the document has been posted.
    fn is_posted(&self, ctx: &LedgerContext, document_id: DocumentId) -> bool;
}

/// Ledger service for posting documents.
///
/// Borrows its collaborators; it holds no state of its own.
pub struct LedgerService<'a, C, P, S, R> {
    accounts: &'a C,
    periods: &'a P,
    store: &'a S,
    registry: &'a R,
}

impl<'a, C, P, S, R> LedgerService<'a, C, P, S, R>
where
    C: AccountCatalog,
    P: PeriodCatalog,
    S: BalanceStore,
    R: DocumentRegistry,
{
    /// Creates a service over the given providers.
    #[must_use]
    pub fn new(accounts: &'a C, periods: &'a P, store: &'a S, registry: &'a R) -> Self {
        Self {
            accounts,
            periods,
            store,
            registry,
        }
    }

    /// Validates a document without posting it.
    ///
    /// Performs every check `post_document` performs except the registry
    /// claim:
    /// 1. Document is not already posted
    /// 2. Entries are well formed and balanced
    /// 3. Period exists and is open
    /// 4. Every account exists and accepts direct postings
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a `LedgerError`.
    pub fn validate(
        &self,
        ctx: &LedgerContext,
        document: &Document,
    ) -> Result<DocumentTotals, LedgerError> {
        if document.status.is_immutable() || self.registry.is_posted(ctx, document.id) {
            return Err(LedgerError::AlreadyPosted(document.id));
        }

        let totals = validate_document(document)?;

        self.ensure_open(ctx, document)?;

        let chart = self.accounts.chart(ctx);
        for entry in &document.entries {
            let account = chart
                .get(&entry.account_id)
                .ok_or(LedgerError::UnknownAccount(entry.account_id))?;
            if !account.supports_posting {
                return Err(LedgerError::AccountNoDirectPosting(account.id));
            }
        }

        Ok(totals)
    }

    /// Posts a draft document.
    ///
    /// On success the returned document carries `DocumentStatus::Posted`. A
    /// failed posting leaves no balance modified and the document unclaimed.
    ///
    /// The period is checked again after the claim, but closing a period is
    /// not atomic with posting into it: callers must not close a period
    /// while postings into it are in flight.
    ///
    /// # Errors
    ///
    /// - `AlreadyPosted` if the document was posted before, including by a
    ///   concurrent caller
    /// - any validation error from [`Self::validate`]
    /// - `Storage` if the balance store rejects the batch
    pub fn post_document(
        &self,
        ctx: &LedgerContext,
        mut document: Document,
    ) -> Result<Document, LedgerError> {
        let totals = self.validate(ctx, &document)?;

        if !self.registry.claim(ctx, document.id) {
            return Err(LedgerError::AlreadyPosted(document.id));
        }

        if let Err(err) = self.ensure_open(ctx, &document) {
            self.registry.release(ctx, document.id);
            return Err(err);
        }

        let accumulator = PostingAccumulator::new(self.accounts, self.store);
        if let Err(err) = accumulator.apply_posting(ctx, document.period_id, &document.entries) {
            self.registry.release(ctx, document.id);
            return Err(err);
        }

        document.status = DocumentStatus::Posted;

        info!(
            organization_id = %ctx.organization_id,
            document_id = %document.id,
            period_id = %document.period_id,
            entries = document.entries.len(),
            total = %totals.debit,
            "Document posted"
        );

        Ok(document)
    }

    fn ensure_open(&self, ctx: &LedgerContext, document: &Document) -> Result<(), LedgerError> {
        let period = self
            .periods
            .get(ctx, document.period_id)
            .ok_or(LedgerError::PeriodNotFound(document.period_id))?;
        if !period.is_open() {
            return Err(LedgerError::PeriodClosed(period.id));
        }
        Ok(())
    }
}
