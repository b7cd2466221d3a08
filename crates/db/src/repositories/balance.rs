//! Control balance repository.
//!
//! Rows live in a `DashMap` keyed by (organization, account, period). Each
//! delta is applied inside the map's entry guard, which serializes writers
//! on the same key (an upsert-with-increment). Writers on different keys run
//! in parallel.
//!
//! A commit gate keeps snapshots consistent: posters hold it shared for the
//! whole batch, snapshots take it exclusively, so a snapshot waits for every
//! in-flight batch and never sees half a document.

use std::collections::HashMap;

use dashmap::DashMap;
use parking_lot::RwLock;
use tally_core::LedgerContext;
use tally_core::ledger::{AccountPeriodBalance, BalanceDelta, BalanceStore, LedgerError, PeriodSnapshot};
use tally_shared::types::{AccountId, OrganizationId, PeriodId};
use tracing::{debug, error};

type BalanceKey = (OrganizationId, AccountId, PeriodId);

/// In-memory `AccountPeriodBalance` store.
#[derive(Default)]
pub struct InMemoryBalanceStore {
    rows: DashMap<BalanceKey, AccountPeriodBalance>,
    revisions: DashMap<OrganizationId, u64>,
    commit: RwLock<()>,
}

impl InMemoryBalanceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current revision of an organization's balances.
    ///
    /// Bumped once per committed batch.
    #[must_use]
    pub fn revision(&self, ctx: &LedgerContext) -> u64 {
        self.revisions
            .get(&ctx.organization_id)
            .map_or(0, |revision| *revision)
    }

    /// Number of rows across every organization.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no row has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Undoes `applied` and drops the rows in `created` that are back to zero.
    ///
    /// A created row another batch has since written to stays in place.
    fn revert(
        &self,
        ctx: &LedgerContext,
        period_id: PeriodId,
        applied: &[BalanceDelta],
        created: &[AccountId],
    ) {
        for delta in applied {
            if let Some(mut row) = self
                .rows
                .get_mut(&(ctx.organization_id, delta.account_id, period_id))
            {
                row.revert(delta);
            }
        }
        for account_id in created {
            self.rows
                .remove_if(&(ctx.organization_id, *account_id, period_id), |_, row| {
                    row.total_debit.is_zero() && row.total_credit.is_zero()
                });
        }
    }
}

impl BalanceStore for InMemoryBalanceStore {
    fn apply(
        &self,
        ctx: &LedgerContext,
        period_id: PeriodId,
        deltas: &[BalanceDelta],
    ) -> Result<Vec<AccountPeriodBalance>, LedgerError> {
        let _gate = self.commit.read();
        let mut updated = Vec::with_capacity(deltas.len());
        let mut created = Vec::new();

        for (applied, delta) in deltas.iter().enumerate() {
            let mut row = self
                .rows
                .entry((ctx.organization_id, delta.account_id, period_id))
                .or_insert_with(|| {
                    created.push(delta.account_id);
                    debug!(
                        organization_id = %ctx.organization_id,
                        account_id = %delta.account_id,
                        period_id = %period_id,
                        "Balance row created"
                    );
                    AccountPeriodBalance::new(delta.account_id, period_id)
                });

            if row.try_add(delta).is_none() {
                drop(row);
                self.revert(ctx, period_id, &deltas[..applied], &created);
                error!(
                    organization_id = %ctx.organization_id,
                    account_id = %delta.account_id,
                    period_id = %period_id,
                    "Balance overflow; batch rolled back"
                );
                return Err(LedgerError::Storage(format!(
                    "balance overflow on account {}",
                    delta.account_id
                )));
            }
            updated.push(row.clone());
        }

        *self.revisions.entry(ctx.organization_id).or_default() += 1;
        Ok(updated)
    }

    fn get(
        &self,
        ctx: &LedgerContext,
        account_id: AccountId,
        period_id: PeriodId,
    ) -> Option<AccountPeriodBalance> {
        self.rows
            .get(&(ctx.organization_id, account_id, period_id))
            .map(|row| row.clone())
    }

    fn snapshot(&self, ctx: &LedgerContext, period_id: PeriodId) -> PeriodSnapshot {
        let _gate = self.commit.write();
        let balances: HashMap<AccountId, AccountPeriodBalance> = self
            .rows
            .iter()
            .filter(|entry| {
                let (organization_id, _, row_period) = entry.key();
                *organization_id == ctx.organization_id && *row_period == period_id
            })
            .map(|entry| (entry.value().account_id, entry.value().clone()))
            .collect();

        PeriodSnapshot {
            revision: self.revision(ctx),
            balances,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn delta(account_id: AccountId, debit: Decimal, credit: Decimal) -> BalanceDelta {
        BalanceDelta {
            account_id,
            debit,
            credit,
        }
    }

    #[test]
    fn test_upsert_creates_then_increments() {
        let store = InMemoryBalanceStore::new();
        let ctx = LedgerContext::new(OrganizationId::new());
        let period = PeriodId::new();
        let account = AccountId::new();

        store
            .apply(&ctx, period, &[delta(account, dec!(100), dec!(0))])
            .unwrap();
        let rows = store
            .apply(&ctx, period, &[delta(account, dec!(5), dec!(20))])
            .unwrap();

        assert_eq!(rows[0].total_debit, dec!(105));
        assert_eq!(rows[0].total_credit, dec!(20));
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(&ctx), 2);
    }

    #[test]
    fn test_organizations_are_isolated() {
        let store = InMemoryBalanceStore::new();
        let acme = LedgerContext::new(OrganizationId::new());
        let globex = LedgerContext::new(OrganizationId::new());
        let period = PeriodId::new();
        let account = AccountId::new();

        store
            .apply(&acme, period, &[delta(account, dec!(1), dec!(0))])
            .unwrap();

        assert!(store.get(&globex, account, period).is_none());
        assert!(store.snapshot(&globex, period).balances.is_empty());
        assert_eq!(store.revision(&globex), 0);
    }

    #[test]
    fn test_overflow_rolls_back_whole_batch() {
        let store = InMemoryBalanceStore::new();
        let ctx = LedgerContext::new(OrganizationId::new());
        let period = PeriodId::new();
        let mut ids = [AccountId::new(), AccountId::new()];
        ids.sort();
        let [first, second] = ids;

        store
            .apply(&ctx, period, &[delta(second, Decimal::MAX, dec!(0))])
            .unwrap();
        let result = store.apply(
            &ctx,
            period,
            &[delta(first, dec!(10), dec!(0)), delta(second, dec!(1), dec!(0))],
        );

        assert!(matches!(result, Err(LedgerError::Storage(_))));
        assert!(store.get(&ctx, first, period).is_none());
        assert_eq!(store.get(&ctx, second, period).unwrap().total_debit, Decimal::MAX);
        assert_eq!(store.len(), 1);
        assert!(!store.snapshot(&ctx, period).balances.contains_key(&first));
        assert_eq!(store.revision(&ctx), 1);
    }

    #[test]
    fn test_snapshot_carries_revision() {
        let store = InMemoryBalanceStore::new();
        let ctx = LedgerContext::new(OrganizationId::new());
        let period = PeriodId::new();
        let account = AccountId::new();

        assert_eq!(store.snapshot(&ctx, period).revision, 0);
        store
            .apply(&ctx, period, &[delta(account, dec!(3), dec!(3))])
            .unwrap();

        let snapshot = store.snapshot(&ctx, period);
        assert_eq!(snapshot.revision, 1);
        assert_eq!(snapshot.balances[&account].net(), Decimal::ZERO);
    }

    /// Strategy for a balanced batch: (account index, amount) debits offset
    /// by a single credit on another index.
    fn batch() -> impl Strategy<Value = (Vec<(usize, Decimal)>, usize)> {
        (
            prop::collection::vec((0usize..4, (1i64..100_000i64).prop_map(|c| Decimal::new(c, 2))), 1..5),
            0usize..4,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_balanced_batches_keep_snapshot_closed(batches in prop::collection::vec(batch(), 1..10)) {
            let store = InMemoryBalanceStore::new();
            let ctx = LedgerContext::new(OrganizationId::new());
            let period = PeriodId::new();
            let accounts: Vec<AccountId> = (0..4).map(|_| AccountId::new()).collect();
            let mut expected_debits: HashMap<AccountId, Decimal> = HashMap::new();

            for (debits, credit_index) in &batches {
                let mut deltas: Vec<BalanceDelta> = debits
                    .iter()
                    .map(|(index, amount)| delta(accounts[*index], *amount, Decimal::ZERO))
                    .collect();
                let total: Decimal = debits.iter().map(|(_, amount)| *amount).sum();
                deltas.push(delta(accounts[*credit_index], Decimal::ZERO, total));
                for (index, amount) in debits {
                    *expected_debits.entry(accounts[*index]).or_default() += *amount;
                }
                store.apply(&ctx, period, &deltas).unwrap();
            }

            let snapshot = store.snapshot(&ctx, period);
            let net: Decimal = snapshot.balances.values().map(AccountPeriodBalance::net).sum();
            prop_assert_eq!(net, Decimal::ZERO);
            prop_assert_eq!(snapshot.revision, batches.len() as u64);
            for (account_id, debit) in expected_debits {
                prop_assert_eq!(snapshot.balances[&account_id].total_debit, debit);
            }
        }
    }
}
