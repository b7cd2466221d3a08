//! Per-account, per-period control balances.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, PeriodId};

use super::entry::{Direction, PostingEntry};
use super::error::LedgerError;

/// Running debit/credit totals of one account in one period.
///
/// Created lazily on the first posting to its key, zero-initialized, and
/// only ever incremented. Both totals are non-decreasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPeriodBalance {
    /// The account ID.
    pub account_id: AccountId,
    /// The period ID.
    pub period_id: PeriodId,
    /// Total debit amount.
    pub total_debit: Decimal,
    /// Total credit amount.
    pub total_credit: Decimal,
}

impl AccountPeriodBalance {
    /// Creates a zero balance for the key.
    #[must_use]
    pub fn new(account_id: AccountId, period_id: PeriodId) -> Self {
        Self {
            account_id,
            period_id,
            total_debit: Decimal::ZERO,
            total_credit: Decimal::ZERO,
        }
    }

    /// Adds a delta to both sides, failing on overflow without mutating.
    ///
    /// # Errors
    ///
    /// Returns `None` if either total would overflow.
    pub fn try_add(&mut self, delta: &BalanceDelta) -> Option<()> {
        let debit = self.total_debit.checked_add(delta.debit)?;
        let credit = self.total_credit.checked_add(delta.credit)?;
        self.total_debit = debit;
        self.total_credit = credit;
        Some(())
    }

    /// Removes a previously added delta.
    pub fn revert(&mut self, delta: &BalanceDelta) {
        self.total_debit -= delta.debit;
        self.total_credit -= delta.credit;
    }

    /// Net balance as debit minus credit.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}

/// Aggregated increment for one account produced by one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceDelta {
    /// The account ID.
    pub account_id: AccountId,
    /// Amount to add to the debit total.
    pub debit: Decimal,
    /// Amount to add to the credit total.
    pub credit: Decimal,
}

impl BalanceDelta {
    /// Folds entries into one delta per account, ordered by account id.
    ///
    /// The ordering gives every writer the same lock order over keys.
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` if an account's sum on one side overflows.
    pub fn aggregate(entries: &[PostingEntry]) -> Result<Vec<Self>, LedgerError> {
        let mut by_account: BTreeMap<AccountId, Self> = BTreeMap::new();
        for entry in entries {
            let delta = by_account.entry(entry.account_id).or_insert(Self {
                account_id: entry.account_id,
                debit: Decimal::ZERO,
                credit: Decimal::ZERO,
            });
            let side = match entry.direction {
                Direction::Debit => &mut delta.debit,
                Direction::Credit => &mut delta.credit,
            };
            *side = side
                .checked_add(entry.amount)
                .ok_or(LedgerError::AmountOverflow(entry.direction))?;
        }
        Ok(by_account.into_values().collect())
    }
}
