//! Statement classification.
//!
//! Assigns each account its statement category, builds the per-category
//! sections and derives net profit. Pure: reads the chart and two balance
//! maps, returns fresh result structures.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tally_shared::types::AccountId;
use tracing::warn;

use super::error::StatementError;
use super::types::{
    AccountRef, GeneralBalance, IncomeStatement, StatementLine, StatementSection,
    UncategorizedAccount,
};
use crate::accounts::{Account, ChartOfAccounts, StatementCategory, TypicalBalance};

/// Builds statements from direct and rolled-up balances.
///
/// Both maps hold nets as debit minus credit. `direct` carries each
/// account's own balance and drives the totals; `rolled_up` carries subtree
/// totals and drives the displayed lines.
pub struct StatementClassifier;

struct Classified<'a> {
    lines: Vec<(&'a Account, StatementLine)>,
    uncategorized: Vec<UncategorizedAccount>,
}

impl StatementClassifier {
    /// Builds the general balance.
    ///
    /// Net profit is appended to equity as a synthetic
    /// [`AccountRef::NetProfit`] line described by `net_profit_label`, and
    /// is included in the equity total.
    ///
    /// # Errors
    ///
    /// Returns a `StatementError` if a total or net profit overflows.
    pub fn general_balance(
        chart: &ChartOfAccounts,
        direct: &HashMap<AccountId, Decimal>,
        rolled_up: &HashMap<AccountId, Decimal>,
        net_profit_label: &str,
    ) -> Result<GeneralBalance, StatementError> {
        let classified = Self::classify(chart, rolled_up);
        let net_profit = Self::net_profit(&classified, direct)?;

        let assets = Self::section(StatementCategory::Asset, &classified, direct)?;
        let liabilities = Self::section(StatementCategory::Liability, &classified, direct)?;
        let mut equity = Self::section(StatementCategory::Equity, &classified, direct)?;

        // Profit sits on the credit side of equity.
        let net = -net_profit;
        equity.lines.push(StatementLine {
            account: AccountRef::NetProfit,
            code: String::new(),
            description: net_profit_label.to_string(),
            parent_id: None,
            category: StatementCategory::Equity,
            net,
            amount: net.abs(),
            movement: TypicalBalance::Credit.movement(net),
            is_root: true,
        });
        equity.total = equity
            .total
            .checked_add(net_profit)
            .ok_or(StatementError::SectionOverflow {
                category: StatementCategory::Equity,
            })?;

        // A sum past the decimal range cannot equal the asset total.
        let is_balanced = liabilities
            .total
            .checked_add(equity.total)
            .is_some_and(|sum| sum == assets.total);

        Ok(GeneralBalance {
            assets,
            liabilities,
            equity,
            net_profit,
            uncategorized: classified.uncategorized,
            is_balanced,
        })
    }

    /// Builds the income statement.
    ///
    /// # Errors
    ///
    /// Returns a `StatementError` if a total or net profit overflows.
    pub fn income_statement(
        chart: &ChartOfAccounts,
        direct: &HashMap<AccountId, Decimal>,
        rolled_up: &HashMap<AccountId, Decimal>,
    ) -> Result<IncomeStatement, StatementError> {
        let classified = Self::classify(chart, rolled_up);
        Ok(IncomeStatement {
            income: Self::section(StatementCategory::Income, &classified, direct)?,
            expenses: Self::section(StatementCategory::Expense, &classified, direct)?,
            net_profit: Self::net_profit(&classified, direct)?,
            uncategorized: classified.uncategorized,
        })
    }

    /// Net profit over income and expense accounts.
    ///
    /// Adds each credit-typical account's balance and subtracts each
    /// debit-typical account's balance, both taken on the account's own
    /// typical side.
    fn net_profit(
        classified: &Classified<'_>,
        direct: &HashMap<AccountId, Decimal>,
    ) -> Result<Decimal, StatementError> {
        classified
            .lines
            .iter()
            .filter(|(_, line)| line.category.is_income_statement())
            .try_fold(Decimal::ZERO, |profit, (account, _)| {
                let balance = account
                    .typical_balance
                    .orient(direct.get(&account.id).copied().unwrap_or_default());
                match account.typical_balance {
                    TypicalBalance::Credit => profit.checked_add(balance),
                    TypicalBalance::Debit => profit.checked_sub(balance),
                }
                .ok_or(StatementError::NetProfitOverflow)
            })
    }

    fn section(
        category: StatementCategory,
        classified: &Classified<'_>,
        direct: &HashMap<AccountId, Decimal>,
    ) -> Result<StatementSection, StatementError> {
        let mut section = StatementSection::empty(category);
        for (account, line) in classified.lines.iter().filter(|(_, l)| l.category == category) {
            let own = direct.get(&account.id).copied().unwrap_or_default();
            section.total = section
                .total
                .checked_add(category.natural_side().orient(own))
                .ok_or(StatementError::SectionOverflow { category })?;
            section.lines.push(line.clone());
        }
        Ok(section)
    }

    fn classify<'a>(
        chart: &'a ChartOfAccounts,
        rolled_up: &HashMap<AccountId, Decimal>,
    ) -> Classified<'a> {
        let mut lines = Vec::new();
        let mut uncategorized = Vec::new();

        for account in chart.sorted() {
            let net = rolled_up.get(&account.id).copied().unwrap_or_default();
            match chart.category_of(&account.id) {
                Some(category) => lines.push((
                    account,
                    StatementLine {
                        account: AccountRef::Real(account.id),
                        code: account.code.clone(),
                        description: account.description.clone(),
                        parent_id: account.parent_id,
                        category,
                        net,
                        amount: net.abs(),
                        movement: account.typical_balance.movement(net),
                        is_root: account.is_root(),
                    },
                )),
                None => {
                    warn!(
                        account_id = %account.id,
                        code = %account.code,
                        "Account has no statement category; excluded from totals"
                    );
                    uncategorized.push(UncategorizedAccount {
                        account_id: account.id,
                        code: account.code.clone(),
                        description: account.description.clone(),
                        net,
                    });
                }
            }
        }

        Classified {
            lines,
            uncategorized,
        }
    }
}
