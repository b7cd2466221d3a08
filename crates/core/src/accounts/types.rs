//! Chart of accounts domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::AccountId;

/// The natural side on which an account's balance sits.
///
/// - Debit-typical accounts (assets, expenses): balance = debit - credit
/// - Credit-typical accounts (liabilities, equity, income): balance = credit - debit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypicalBalance {
    /// Balance normally sits on the debit side.
    Debit,
    /// Balance normally sits on the credit side.
    Credit,
}

impl TypicalBalance {
    /// Orients a raw net (debit - credit) to this side.
    ///
    /// Positive when the account sits on its natural side.
    #[must_use]
    pub fn orient(self, net: Decimal) -> Decimal {
        match self {
            Self::Debit => net,
            Self::Credit => -net,
        }
    }

    /// Whether a raw net (debit - credit) moves the account towards its natural side.
    ///
    /// Returns `None` for a zero net.
    #[must_use]
    pub fn movement(self, net: Decimal) -> Option<Movement> {
        let oriented = self.orient(net);
        if oriented.is_zero() {
            None
        } else if oriented.is_sign_positive() {
            Some(Movement::Increase)
        } else {
            Some(Movement::Decrease)
        }
    }
}

/// Conceptual direction of a balance relative to the account's typical side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Movement {
    /// Balance sits on the typical side.
    Increase,
    /// Balance sits on the contrary side.
    Decrease,
}

/// Top-level financial statement category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementCategory {
    /// Assets (balance sheet).
    Asset,
    /// Liabilities (balance sheet).
    Liability,
    /// Equity (balance sheet).
    Equity,
    /// Income (income statement).
    Income,
    /// Expenses (income statement).
    Expense,
}

impl StatementCategory {
    /// Returns true for categories that feed net profit.
    #[must_use]
    pub fn is_income_statement(self) -> bool {
        matches!(self, Self::Income | Self::Expense)
    }

    /// The side on which section totals of this category are presented.
    #[must_use]
    pub fn natural_side(self) -> TypicalBalance {
        match self {
            Self::Asset | Self::Expense => TypicalBalance::Debit,
            Self::Liability | Self::Equity | Self::Income => TypicalBalance::Credit,
        }
    }

    /// Infers a category from a human-readable account description.
    ///
    /// Only used for legacy charts that predate explicit category tags.
    #[must_use]
    pub fn from_legacy_label(description: &str) -> Option<Self> {
        const KEYWORDS: [(&str, StatementCategory); 14] = [
            ("ACTIVO", StatementCategory::Asset),
            ("ASSET", StatementCategory::Asset),
            ("PASIVO", StatementCategory::Liability),
            ("LIABILIT", StatementCategory::Liability),
            ("PATRIMONIO", StatementCategory::Equity),
            ("CAPITAL", StatementCategory::Equity),
            ("EQUITY", StatementCategory::Equity),
            ("INGRESO", StatementCategory::Income),
            ("INCOME", StatementCategory::Income),
            ("REVENUE", StatementCategory::Income),
            ("GASTO", StatementCategory::Expense),
            ("COSTO", StatementCategory::Expense),
            ("EXPENSE", StatementCategory::Expense),
            ("COST", StatementCategory::Expense),
        ];

        let label = description.to_uppercase();
        KEYWORDS
            .iter()
            .find(|(keyword, _)| label.contains(keyword))
            .map(|(_, category)| *category)
    }

    /// Returns the string representation of the category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for StatementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chart of accounts entry.
///
/// Created and edited by the account catalog; read-only to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Account code (e.g. "1.1.01").
    pub code: String,
    /// Human-readable description.
    pub description: String,
    /// Parent account, `None` for roots.
    pub parent_id: Option<AccountId>,
    /// Natural balance side.
    pub typical_balance: TypicalBalance,
    /// Explicit statement category tag.
    pub category: Option<StatementCategory>,
    /// Whether the account receives direct postings.
    pub supports_posting: bool,
}

impl Account {
    /// Creates a root account without a category tag.
    #[must_use]
    pub fn new(code: impl Into<String>, description: impl Into<String>, typical_balance: TypicalBalance) -> Self {
        Self {
            id: AccountId::new(),
            code: code.into(),
            description: description.into(),
            parent_id: None,
            typical_balance,
            category: None,
            supports_posting: false,
        }
    }

    /// Sets the parent account.
    #[must_use]
    pub fn with_parent(mut self, parent_id: AccountId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the explicit category tag.
    #[must_use]
    pub fn with_category(mut self, category: StatementCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Marks the account as postable.
    #[must_use]
    pub fn postable(mut self) -> Self {
        self.supports_posting = true;
        self
    }

    /// Returns true if this account has no parent.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// The category inferred from the description for legacy charts.
    #[must_use]
    pub fn legacy_category(&self) -> Option<StatementCategory> {
        StatementCategory::from_legacy_label(&self.description)
    }
}
