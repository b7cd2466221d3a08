//! Property-based tests for the hierarchy rollup.
//!
//! - Conservation: root totals sum to the sum of every attached amount
//! - Determinism: every node total equals the sum of the amounts attached
//!   to its subtree, whatever order ready nodes were processed in

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::AccountId;

use super::rollup::HierarchyRollup;

/// Strategy to generate signed amounts (-10,000.00 to 10,000.00).
fn signed_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// A random forest: node `i` either is a root or points at some node `< i`.
fn forest() -> impl Strategy<Value = Vec<(Option<usize>, Option<Decimal>)>> {
    prop::collection::vec(
        (
            prop::option::weighted(0.8, any::<usize>()),
            prop::option::of(signed_amount()),
        ),
        1..40,
    )
}

struct Built {
    ids: Vec<AccountId>,
    parents: HashMap<AccountId, Option<AccountId>>,
    balances: HashMap<AccountId, Decimal>,
}

fn build(nodes: &[(Option<usize>, Option<Decimal>)]) -> Built {
    let ids: Vec<AccountId> = nodes.iter().map(|_| AccountId::new()).collect();
    let mut parents = HashMap::new();
    let mut balances = HashMap::new();
    for (i, (parent, amount)) in nodes.iter().enumerate() {
        let parent = parent.filter(|_| i > 0).map(|raw| ids[raw % i]);
        parents.insert(ids[i], parent);
        if let Some(amount) = amount {
            balances.insert(ids[i], *amount);
        }
    }
    Built {
        ids,
        parents,
        balances,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_conservation(nodes in forest()) {
        let built = build(&nodes);
        let totals = HierarchyRollup::roll_up(&built.balances, &built.parents).unwrap();

        let roots: Decimal = built
            .parents
            .iter()
            .filter(|(_, parent)| parent.is_none())
            .map(|(id, _)| totals[id])
            .sum();
        let attached: Decimal = built.balances.values().copied().sum();
        prop_assert_eq!(roots, attached);
    }

    #[test]
    fn prop_totals_match_subtree_sums(nodes in forest()) {
        let built = build(&nodes);
        let totals = HierarchyRollup::roll_up(&built.balances, &built.parents).unwrap();

        for id in &built.ids {
            let mut expected = Decimal::ZERO;
            for (member, amount) in &built.balances {
                let mut cursor = Some(*member);
                while let Some(current) = cursor {
                    if current == *id {
                        expected += *amount;
                        break;
                    }
                    cursor = built.parents[&current];
                }
            }
            prop_assert_eq!(totals[id], expected);
        }
    }

    #[test]
    fn prop_dangling_parent_always_detected(nodes in forest()) {
        let mut built = build(&nodes);
        let orphan = built.ids[built.ids.len() - 1];
        built.parents.insert(orphan, Some(AccountId::new()));

        let result = HierarchyRollup::roll_up(&built.balances, &built.parents);
        prop_assert!(result.is_err());
        prop_assert_eq!(result.unwrap_err().account_id(), orphan);
    }
}
