//! Hierarchy rollup.
//!
//! Folds per-account amounts up a parent-pointer forest. Nodes are
//! processed in reverse topological order (Kahn's algorithm over the
//! child → parent edges): a node is added into its parent only once every
//! one of its own children has been added into it.

use std::collections::{HashMap, VecDeque};

use rust_decimal::Decimal;
use tally_shared::types::AccountId;
use tracing::warn;

use super::error::HierarchyError;
use crate::accounts::ChartOfAccounts;

/// Bottom-up rollup of balances through an account tree.
///
/// Stateless; both inputs are read-only and every call returns a fresh map.
pub struct HierarchyRollup;

impl HierarchyRollup {
    /// Rolls `leaf_balances` up through `parent_of`.
    ///
    /// `parent_of` must list every account of the hierarchy, roots mapped to
    /// `None`. Amounts may be attached to any node, not only leaves. The
    /// result holds a total for every node in `parent_of`: its own amount
    /// plus the amounts of everything beneath it.
    ///
    /// # Errors
    ///
    /// - `UnknownAccount` if a balance names an account missing from `parent_of`
    /// - `DanglingParent` if a parent reference cannot be resolved
    /// - `Cycle` if an account is its own ancestor; carries the smallest id
    ///   on the cycle
    /// - `Overflow` if a parent's running total leaves the decimal range;
    ///   carries the parent id
    pub fn roll_up(
        leaf_balances: &HashMap<AccountId, Decimal>,
        parent_of: &HashMap<AccountId, Option<AccountId>>,
    ) -> Result<HashMap<AccountId, Decimal>, HierarchyError> {
        // Sorted ids make error reporting independent of hash order.
        let mut ids: Vec<AccountId> = parent_of.keys().copied().collect();
        ids.sort_unstable();

        let mut unknown: Vec<AccountId> = leaf_balances
            .keys()
            .filter(|id| !parent_of.contains_key(id))
            .copied()
            .collect();
        unknown.sort_unstable();
        if let Some(account_id) = unknown.first() {
            warn!(account_id = %account_id, "Balance attached to account outside the hierarchy");
            return Err(HierarchyError::UnknownAccount(*account_id));
        }

        let mut remaining_children: HashMap<AccountId, usize> = HashMap::new();
        for id in &ids {
            let Some(parent_id) = parent_of[id] else {
                continue;
            };
            if parent_id == *id {
                warn!(account_id = %id, "Account is its own parent");
                return Err(HierarchyError::Cycle { account_id: *id });
            }
            if !parent_of.contains_key(&parent_id) {
                warn!(account_id = %id, parent_id = %parent_id, "Dangling parent reference");
                return Err(HierarchyError::DanglingParent {
                    account_id: *id,
                    parent_id,
                });
            }
            *remaining_children.entry(parent_id).or_default() += 1;
        }

        let mut totals: HashMap<AccountId, Decimal> = ids
            .iter()
            .map(|id| (*id, leaf_balances.get(id).copied().unwrap_or_default()))
            .collect();

        let mut ready: VecDeque<AccountId> = ids
            .iter()
            .filter(|id| !remaining_children.contains_key(id))
            .copied()
            .collect();
        let mut finalized = 0usize;

        while let Some(id) = ready.pop_front() {
            finalized += 1;
            let Some(parent_id) = parent_of[&id] else {
                continue;
            };
            let amount = totals[&id];
            let total = totals.entry(parent_id).or_default();
            *total = total.checked_add(amount).ok_or_else(|| {
                warn!(account_id = %parent_id, "Rolled-up total overflows");
                HierarchyError::Overflow {
                    account_id: parent_id,
                }
            })?;
            if let Some(count) = remaining_children.get_mut(&parent_id) {
                *count -= 1;
                if *count == 0 {
                    ready.push_back(parent_id);
                }
            }
        }

        if finalized < ids.len() {
            // Only accounts on a cycle still wait for a child.
            let account_id = ids
                .iter()
                .find(|id| remaining_children.get(id).is_some_and(|count| *count > 0))
                .copied()
                .unwrap_or(ids[0]);
            warn!(account_id = %account_id, "Cycle in account hierarchy");
            return Err(HierarchyError::Cycle { account_id });
        }

        Ok(totals)
    }

    /// Rolls balances up through a chart of accounts.
    ///
    /// # Errors
    ///
    /// See [`Self::roll_up`].
    pub fn roll_up_chart(
        chart: &ChartOfAccounts,
        leaf_balances: &HashMap<AccountId, Decimal>,
    ) -> Result<HashMap<AccountId, Decimal>, HierarchyError> {
        Self::roll_up(leaf_balances, &chart.parent_map())
    }
}
