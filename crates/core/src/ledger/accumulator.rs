//! Posting accumulator.
//!
//! Applies pre-validated, balanced entries to the per-(account, period)
//! running totals. The accumulator does not check balance or detect
//! re-posting: applying the same entries twice doubles every touched total.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tally_shared::types::{AccountId, PeriodId};
use tracing::debug;

use super::balance::{AccountPeriodBalance, BalanceDelta};
use super::entry::PostingEntry;
use super::error::LedgerError;
use crate::accounts::AccountCatalog;
use crate::context::LedgerContext;

/// Committed balances of one period, read under a single revision.
#[derive(Debug, Clone, Default)]
pub struct PeriodSnapshot {
    /// Store revision the snapshot was taken at.
    pub revision: u64,
    /// Balance rows keyed by account.
    pub balances: HashMap<AccountId, AccountPeriodBalance>,
}

/// Storage of `AccountPeriodBalance` rows.
///
/// Implementations must serialize writers touching the same key (row lock
/// or atomic upsert-with-increment) and must apply the deltas of one call
/// all-or-nothing. Snapshots must never include part of a call.
pub trait BalanceStore: Send + Sync {
    /// Fetch-or-create each row and add its delta. Returns the updated rows.
    fn apply(
        &self,
        ctx: &LedgerContext,
        period_id: PeriodId,
        deltas: &[BalanceDelta],
    ) -> Result<Vec<AccountPeriodBalance>, LedgerError>;

    /// Reads a single row.
    fn get(
        &self,
        ctx: &LedgerContext,
        account_id: AccountId,
        period_id: PeriodId,
    ) -> Option<AccountPeriodBalance>;

    /// Reads every committed row of a period.
    fn snapshot(&self, ctx: &LedgerContext, period_id: PeriodId) -> PeriodSnapshot;
}

/// Applies balanced entries to the balance store.
pub struct PostingAccumulator<'a, C, S> {
    accounts: &'a C,
    store: &'a S,
}

impl<'a, C, S> PostingAccumulator<'a, C, S>
where
    C: AccountCatalog,
    S: BalanceStore,
{
    /// Creates an accumulator over the given catalog and store.
    #[must_use]
    pub fn new(accounts: &'a C, store: &'a S) -> Self {
        Self { accounts, store }
    }

    /// Applies a batch of entries to `period_id`.
    ///
    /// Every entry is checked before the store is touched, so a failing
    /// batch leaves no row modified.
    ///
    /// # Errors
    ///
    /// - `UnknownAccount` if an entry names an account outside the chart
    /// - `PeriodMismatch` if an entry belongs to another period
    /// - `NegativeAmount` if an amount is below zero
    /// - `AmountOverflow` if an account's sum on one side overflows
    /// - `Storage` if the store rejects the batch
    pub fn apply_posting(
        &self,
        ctx: &LedgerContext,
        period_id: PeriodId,
        entries: &[PostingEntry],
    ) -> Result<Vec<AccountPeriodBalance>, LedgerError> {
        let chart = self.accounts.chart(ctx);

        for entry in entries {
            if !chart.contains(&entry.account_id) {
                return Err(LedgerError::UnknownAccount(entry.account_id));
            }
            if entry.period_id != period_id {
                return Err(LedgerError::PeriodMismatch {
                    expected: period_id,
                    found: entry.period_id,
                });
            }
            if entry.amount < Decimal::ZERO {
                return Err(LedgerError::NegativeAmount {
                    account_id: entry.account_id,
                    amount: entry.amount,
                });
            }
        }

        let deltas = BalanceDelta::aggregate(entries)?;
        let rows = self.store.apply(ctx, period_id, &deltas)?;

        debug!(
            organization_id = %ctx.organization_id,
            period_id = %period_id,
            accounts = rows.len(),
            "Applied posting"
        );

        Ok(rows)
    }
}
