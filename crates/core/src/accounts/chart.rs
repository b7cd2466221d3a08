//! Indexed chart of accounts.

use std::collections::{HashMap, HashSet};

use tally_shared::types::AccountId;

use super::types::{Account, StatementCategory};

/// The chart of accounts of one organization, indexed for tree walks.
#[derive(Debug, Clone, Default)]
pub struct ChartOfAccounts {
    accounts: HashMap<AccountId, Account>,
}

impl ChartOfAccounts {
    /// Builds the index. A later account with a duplicate id replaces the earlier one.
    #[must_use]
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: accounts.into_iter().map(|a| (a.id, a)).collect(),
        }
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the chart has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Looks up an account by id.
    #[must_use]
    pub fn get(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Returns true if the account exists.
    #[must_use]
    pub fn contains(&self, id: &AccountId) -> bool {
        self.accounts.contains_key(id)
    }

    /// Iterates over all accounts in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// The parent-pointer map consumed by the hierarchy rollup.
    #[must_use]
    pub fn parent_map(&self) -> HashMap<AccountId, Option<AccountId>> {
        self.accounts
            .values()
            .map(|a| (a.id, a.parent_id))
            .collect()
    }

    /// Accounts that receive direct postings, ordered by code.
    #[must_use]
    pub fn postable(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self
            .accounts
            .values()
            .filter(|a| a.supports_posting)
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        accounts
    }

    /// All accounts ordered by code.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        accounts
    }

    /// Walks from an account up to its root, self first.
    ///
    /// The walk stops at a dangling parent reference or when an account
    /// would be visited twice.
    #[must_use]
    pub fn ancestors(&self, id: &AccountId) -> Ancestors<'_> {
        Ancestors {
            chart: self,
            next: self.accounts.get(id),
            visited: HashSet::new(),
        }
    }

    /// Resolves the statement category of an account.
    ///
    /// The closest ancestor (self first) carrying an explicit tag wins. When
    /// no ancestor is tagged, the legacy description inference is tried along
    /// the same chain.
    #[must_use]
    pub fn category_of(&self, id: &AccountId) -> Option<StatementCategory> {
        self.ancestors(id)
            .find_map(|a| a.category)
            .or_else(|| self.ancestors(id).find_map(Account::legacy_category))
    }
}

/// Iterator over an account and its ancestors.
pub struct Ancestors<'a> {
    chart: &'a ChartOfAccounts,
    next: Option<&'a Account>,
    visited: HashSet<AccountId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Account;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if !self.visited.insert(current.id) {
            return None;
        }
        self.next = current
            .parent_id
            .and_then(|parent_id| self.chart.accounts.get(&parent_id));
        Some(current)
    }
}
