//! Trial balance calculation.
//!
//! Combines the "current" initial snapshot with a period's control balances
//! into initial/period/final column pairs per postable account.

use std::collections::HashMap;

use rayon::prelude::*;
use tally_shared::types::{AccountId, PeriodId};

use super::error::ReportError;
use super::types::{
    DebitCredit, InitialBalance, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
use crate::accounts::Account;
use crate::ledger::AccountPeriodBalance;

/// Trial balance calculator.
pub struct TrialBalanceCalculator;

impl TrialBalanceCalculator {
    /// Computes the row of one account.
    ///
    /// A missing snapshot or control balance counts as zero. The initial
    /// columns follow the account's typical side.
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` if the final balance leaves the decimal range.
    pub fn row(
        account: &Account,
        initial: Option<&InitialBalance>,
        period: Option<&AccountPeriodBalance>,
    ) -> Result<TrialBalanceRow, ReportError> {
        let initial = initial
            .map(|snapshot| snapshot.columns(account.typical_balance))
            .unwrap_or_default();
        let period = period.map(DebitCredit::from).unwrap_or_default();
        let net = initial.net().checked_add(period.net()).ok_or_else(|| {
            ReportError::AmountOverflow(format!("final balance of account {}", account.id))
        })?;

        Ok(TrialBalanceRow {
            account_id: account.id,
            code: account.code.clone(),
            description: account.description.clone(),
            typical_balance: account.typical_balance,
            initial,
            period,
            closing: DebitCredit::from_net(net),
        })
    }

    /// Computes the trial balance of `accounts` for one period.
    ///
    /// Rows follow the order of `accounts`. With at least
    /// `parallel_threshold` accounts the rows are computed on the rayon
    /// pool; the output is identical either way.
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` if a final balance or a column total leaves
    /// the decimal range.
    pub fn calculate(
        period_id: PeriodId,
        currency: &str,
        accounts: &[&Account],
        initial: &HashMap<AccountId, InitialBalance>,
        balances: &HashMap<AccountId, AccountPeriodBalance>,
        parallel_threshold: usize,
    ) -> Result<TrialBalanceReport, ReportError> {
        let build = |account: &&Account| {
            Self::row(account, initial.get(&account.id), balances.get(&account.id))
        };

        let rows: Vec<TrialBalanceRow> = if accounts.len() >= parallel_threshold {
            accounts.par_iter().map(build).collect::<Result<_, _>>()?
        } else {
            accounts.iter().map(build).collect::<Result<_, _>>()?
        };

        Ok(TrialBalanceReport {
            period_id,
            currency: currency.to_string(),
            totals: TrialBalanceTotals::from_rows(&rows)?,
            rows,
        })
    }

    /// Turns a trial balance into the next period's initial snapshot.
    ///
    /// Each final balance is oriented to its account's typical side.
    #[must_use]
    pub fn carry_forward(report: &TrialBalanceReport) -> HashMap<AccountId, InitialBalance> {
        report
            .rows
            .iter()
            .map(|row| {
                (
                    row.account_id,
                    InitialBalance {
                        account_id: row.account_id,
                        amount: row.typical_balance.orient(row.closing.net()),
                        typical_balance: row.typical_balance,
                    },
                )
            })
            .collect()
    }
}
