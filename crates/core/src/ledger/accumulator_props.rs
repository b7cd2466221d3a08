//! Property-based tests for the posting accumulator.
//!
//! - Double-entry closure: a balanced document moves the sum of all
//!   touched nets by exactly zero
//! - Idempotence boundary: applying the same entries twice doubles every
//!   touched total

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::{AccountId, PeriodId};

use super::accumulator::{BalanceStore, PostingAccumulator};
use super::entry::PostingEntry;
use crate::test_support::{FakeBalanceStore, SampleIds, sample_chart};

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn postable(ids: &SampleIds) -> Vec<AccountId> {
    vec![ids.cash, ids.receivables, ids.payables, ids.capital, ids.sales, ids.rent, ids.clearing]
}

/// Builds a balanced document: each debit line is offset by a credit of the
/// same amount on another (possibly identical) account.
fn balanced_entries(
    accounts: &[AccountId],
    lines: &[(usize, usize, Decimal)],
    period: PeriodId,
) -> Vec<PostingEntry> {
    lines
        .iter()
        .flat_map(|(debit, credit, amount)| {
            [
                PostingEntry::debit(accounts[debit % accounts.len()], *amount, period),
                PostingEntry::credit(accounts[credit % accounts.len()], *amount, period),
            ]
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_double_entry_closure(
        lines in prop::collection::vec((0usize..7, 0usize..7, positive_amount()), 1..10)
    ) {
        let (catalog, ids) = sample_chart();
        let ctx = catalog.ctx;
        let store = FakeBalanceStore::default();
        let period = PeriodId::new();
        let entries = balanced_entries(&postable(&ids), &lines, period);

        PostingAccumulator::new(&catalog, &store)
            .apply_posting(&ctx, period, &entries)
            .unwrap();

        let net: Decimal = store
            .snapshot(&ctx, period)
            .balances
            .values()
            .map(|row| row.net())
            .sum();
        prop_assert_eq!(net, Decimal::ZERO);
    }

    #[test]
    fn prop_reapplying_doubles_totals(
        lines in prop::collection::vec((0usize..7, 0usize..7, positive_amount()), 1..10)
    ) {
        let (catalog, ids) = sample_chart();
        let ctx = catalog.ctx;
        let store = FakeBalanceStore::default();
        let period = PeriodId::new();
        let entries = balanced_entries(&postable(&ids), &lines, period);
        let accumulator = PostingAccumulator::new(&catalog, &store);

        accumulator.apply_posting(&ctx, period, &entries).unwrap();
        let once = store.snapshot(&ctx, period).balances;
        accumulator.apply_posting(&ctx, period, &entries).unwrap();
        let twice = store.snapshot(&ctx, period).balances;

        prop_assert_eq!(once.len(), twice.len());
        for (account, row) in &once {
            let doubled = &twice[account];
            prop_assert_eq!(doubled.total_debit, row.total_debit * Decimal::TWO);
            prop_assert_eq!(doubled.total_credit, row.total_credit * Decimal::TWO);
        }
    }
}
