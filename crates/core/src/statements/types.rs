//! Statement result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::AccountId;

use crate::accounts::{Movement, StatementCategory};

/// Reference to the account a statement line stands for.
///
/// The synthetic net-profit line has no row in the chart of accounts; it is
/// a distinct variant, so it can never be mistaken for a real account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AccountRef {
    /// A real account of the chart.
    Real(AccountId),
    /// The net profit injected into equity.
    NetProfit,
}

impl AccountRef {
    /// Returns the real account id, if any.
    #[must_use]
    pub fn account_id(self) -> Option<AccountId> {
        match self {
            Self::Real(id) => Some(id),
            Self::NetProfit => None,
        }
    }
}

impl From<AccountId> for AccountRef {
    fn from(id: AccountId) -> Self {
        Self::Real(id)
    }
}

/// One account of a statement, derived fresh per report call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// The account.
    pub account: AccountRef,
    /// Account code; empty for the synthetic line.
    pub code: String,
    /// Account description.
    pub description: String,
    /// Parent account.
    pub parent_id: Option<AccountId>,
    /// Resolved statement category.
    pub category: StatementCategory,
    /// Rolled-up net, debit minus credit.
    pub net: Decimal,
    /// Displayable magnitude, `abs(net)`.
    pub amount: Decimal,
    /// Direction relative to the account's typical side; `None` when zero.
    pub movement: Option<Movement>,
    /// Whether the account has no parent.
    pub is_root: bool,
}

/// Lines of one category and their total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSection {
    /// The category.
    pub category: StatementCategory,
    /// Sum of the direct balances of the section, oriented to the
    /// category's natural side.
    pub total: Decimal,
    /// Lines ordered by account code.
    pub lines: Vec<StatementLine>,
}

impl StatementSection {
    /// Creates an empty section.
    #[must_use]
    pub fn empty(category: StatementCategory) -> Self {
        Self {
            category,
            total: Decimal::ZERO,
            lines: Vec::new(),
        }
    }

    fn round(&mut self, scale: u32) {
        self.total = self.total.round_dp(scale);
        for line in &mut self.lines {
            line.net = line.net.round_dp(scale);
            line.amount = line.amount.round_dp(scale);
        }
    }
}

/// An account no ancestor assigns a category to.
///
/// Excluded from every total, but always reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncategorizedAccount {
    /// The account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account description.
    pub description: String,
    /// Rolled-up net, debit minus credit.
    pub net: Decimal,
}

/// Balance sheet view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralBalance {
    /// Asset accounts.
    pub assets: StatementSection,
    /// Liability accounts.
    pub liabilities: StatementSection,
    /// Equity accounts, including the synthetic net-profit line.
    pub equity: StatementSection,
    /// Net profit injected into equity.
    pub net_profit: Decimal,
    /// Accounts left out of the totals.
    pub uncategorized: Vec<UncategorizedAccount>,
    /// Whether assets equal liabilities plus equity.
    pub is_balanced: bool,
}

impl GeneralBalance {
    /// Rounds every amount to `scale` decimal places (banker's rounding).
    #[must_use]
    pub fn rounded(mut self, scale: u32) -> Self {
        self.assets.round(scale);
        self.liabilities.round(scale);
        self.equity.round(scale);
        self.net_profit = self.net_profit.round_dp(scale);
        for account in &mut self.uncategorized {
            account.net = account.net.round_dp(scale);
        }
        self
    }
}

/// Income statement view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Income accounts.
    pub income: StatementSection,
    /// Expense accounts.
    pub expenses: StatementSection,
    /// Credit-typical amounts minus debit-typical amounts.
    pub net_profit: Decimal,
    /// Accounts left out of the totals.
    pub uncategorized: Vec<UncategorizedAccount>,
}

impl IncomeStatement {
    /// Rounds every amount to `scale` decimal places (banker's rounding).
    #[must_use]
    pub fn rounded(mut self, scale: u32) -> Self {
        self.income.round(scale);
        self.expenses.round(scale);
        self.net_profit = self.net_profit.round_dp(scale);
        for account in &mut self.uncategorized {
            account.net = account.net.round_dp(scale);
        }
        self
    }
}
