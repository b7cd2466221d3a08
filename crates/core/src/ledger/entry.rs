//! Posting entry domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, PeriodId};

/// The side an entry affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Debit entry (increases assets/expenses, decreases liabilities/equity/income).
    Debit,
    /// Credit entry (decreases assets/expenses, increases liabilities/equity/income).
    Credit,
}

/// A single line of a posting document.
///
/// Documents consist of multiple entries that must balance (debits = credits).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingEntry {
    /// The account affected by this entry.
    pub account_id: AccountId,
    /// Non-negative amount.
    pub amount: Decimal,
    /// Whether this is a debit or credit.
    pub direction: Direction,
    /// The period this entry is recorded in.
    pub period_id: PeriodId,
}

impl PostingEntry {
    /// Creates a debit entry.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal, period_id: PeriodId) -> Self {
        Self {
            account_id,
            amount,
            direction: Direction::Debit,
            period_id,
        }
    }

    /// Creates a credit entry.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal, period_id: PeriodId) -> Self {
        Self {
            account_id,
            amount,
            direction: Direction::Credit,
            period_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_constructors_set_direction() {
        let period = PeriodId::new();
        let account = AccountId::new();

        let debit = PostingEntry::debit(account, dec!(7.5), period);
        assert_eq!(debit.direction, Direction::Debit);
        assert_eq!(debit.amount, dec!(7.5));

        let credit = PostingEntry::credit(account, dec!(7.5), period);
        assert_eq!(credit.direction, Direction::Credit);
        assert_eq!(credit.period_id, period);
    }
}
