//! Report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, PeriodId};

use super::error::ReportError;
use crate::accounts::TypicalBalance;
use crate::ledger::AccountPeriodBalance;

/// A (debit, credit) column pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebitCredit {
    /// Debit column.
    pub debit: Decimal,
    /// Credit column.
    pub credit: Decimal,
}

impl DebitCredit {
    /// Creates a column pair.
    #[must_use]
    pub const fn new(debit: Decimal, credit: Decimal) -> Self {
        Self { debit, credit }
    }

    /// Net presentation of a debit-minus-credit amount.
    ///
    /// At most one column is nonzero.
    #[must_use]
    pub fn from_net(net: Decimal) -> Self {
        if net.is_sign_positive() {
            Self::new(net, Decimal::ZERO)
        } else {
            Self::new(Decimal::ZERO, -net)
        }
    }

    /// Debit minus credit.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Column-wise sum, `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self::new(
            self.debit.checked_add(rhs.debit)?,
            self.credit.checked_add(rhs.credit)?,
        ))
    }

    fn round(&mut self, scale: u32) {
        self.debit = self.debit.round_dp(scale);
        self.credit = self.credit.round_dp(scale);
    }
}

impl From<&AccountPeriodBalance> for DebitCredit {
    fn from(balance: &AccountPeriodBalance) -> Self {
        Self::new(balance.total_debit, balance.total_credit)
    }
}

/// Balance carried into a period from prior periods.
///
/// Published by the period-close process; read-only to reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialBalance {
    /// The account ID.
    pub account_id: AccountId,
    /// Amount on the account's typical side; negative when the account
    /// sits on its opposite side.
    pub amount: Decimal,
    /// Typical side of the account when the snapshot was taken.
    pub typical_balance: TypicalBalance,
}

impl InitialBalance {
    /// Places the amount in the column of `typical`, the account's current
    /// typical side.
    ///
    /// A negative amount lands in the opposite column as a positive value.
    #[must_use]
    pub fn columns(&self, typical: TypicalBalance) -> DebitCredit {
        DebitCredit::from_net(match typical {
            TypicalBalance::Debit => self.amount,
            TypicalBalance::Credit => -self.amount,
        })
    }
}

/// One postable account of the trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account description.
    pub description: String,
    /// Typical side of the account.
    pub typical_balance: TypicalBalance,
    /// Balance carried in from prior periods.
    pub initial: DebitCredit,
    /// Movement recorded in the period.
    pub period: DebitCredit,
    /// Net presentation of initial plus period.
    #[serde(rename = "final")]
    pub closing: DebitCredit,
}

/// Column totals of the trial balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Sum of initial columns.
    pub initial: DebitCredit,
    /// Sum of period columns.
    pub period: DebitCredit,
    /// Sum of final columns.
    #[serde(rename = "final")]
    pub closing: DebitCredit,
    /// Whether final debits equal final credits.
    pub is_balanced: bool,
}

impl TrialBalanceTotals {
    /// Sums the columns of the given rows.
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` if a column total leaves the decimal range.
    pub fn from_rows(rows: &[TrialBalanceRow]) -> Result<Self, ReportError> {
        let mut totals = Self::default();
        for row in rows {
            let (Some(initial), Some(period), Some(closing)) = (
                totals.initial.checked_add(row.initial),
                totals.period.checked_add(row.period),
                totals.closing.checked_add(row.closing),
            ) else {
                return Err(ReportError::AmountOverflow(
                    "trial balance column totals".to_string(),
                ));
            };
            totals.initial = initial;
            totals.period = period;
            totals.closing = closing;
        }
        totals.is_balanced = totals.closing.debit == totals.closing.credit;
        Ok(totals)
    }
}

/// Trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// The period the movement columns come from.
    pub period_id: PeriodId,
    /// Currency code.
    pub currency: String,
    /// Rows ordered by account code.
    pub rows: Vec<TrialBalanceRow>,
    /// Totals.
    pub totals: TrialBalanceTotals,
}

impl TrialBalanceReport {
    /// Rounds every amount to `scale` decimal places (banker's rounding).
    #[must_use]
    pub fn rounded(mut self, scale: u32) -> Self {
        for row in &mut self.rows {
            row.initial.round(scale);
            row.period.round(scale);
            row.closing.round(scale);
        }
        self.totals.initial.round(scale);
        self.totals.period.round(scale);
        self.totals.closing.round(scale);
        self
    }
}
