//! In-process fakes for the provider traits, used by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tally_shared::types::{AccountId, DocumentId, OrganizationId, PeriodId};

use crate::accounts::{Account, AccountCatalog, ChartOfAccounts, StatementCategory, TypicalBalance};
use crate::context::LedgerContext;
use crate::fiscal::{AccountingPeriod, PeriodCatalog};
use crate::ledger::{
    AccountPeriodBalance, BalanceDelta, BalanceStore, DocumentRegistry, LedgerError,
    PeriodSnapshot,
};
use crate::reports::{InitialBalance, SnapshotSource};

pub struct FakeCatalog {
    pub ctx: LedgerContext,
    pub chart: Arc<ChartOfAccounts>,
}

impl FakeCatalog {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            ctx: LedgerContext::new(OrganizationId::new()),
            chart: Arc::new(ChartOfAccounts::new(accounts)),
        }
    }
}

impl AccountCatalog for FakeCatalog {
    fn chart(&self, _ctx: &LedgerContext) -> Arc<ChartOfAccounts> {
        Arc::clone(&self.chart)
    }
}

/// Ids of the accounts in [`sample_chart`].
pub struct SampleIds {
    pub assets: AccountId,
    pub cash: AccountId,
    pub receivables: AccountId,
    pub liabilities: AccountId,
    pub payables: AccountId,
    pub equity: AccountId,
    pub capital: AccountId,
    pub income: AccountId,
    pub sales: AccountId,
    pub expenses: AccountId,
    pub rent: AccountId,
    pub clearing: AccountId,
}

/// A small tagged chart with one postable leaf per category plus an
/// untagged clearing account.
pub fn sample_chart() -> (FakeCatalog, SampleIds) {
    let assets =
        Account::new("1", "Assets", TypicalBalance::Debit).with_category(StatementCategory::Asset);
    let cash = Account::new("1.01", "Cash", TypicalBalance::Debit)
        .with_parent(assets.id)
        .postable();
    let receivables = Account::new("1.02", "Receivables", TypicalBalance::Debit)
        .with_parent(assets.id)
        .postable();
    let liabilities = Account::new("2", "Liabilities", TypicalBalance::Credit)
        .with_category(StatementCategory::Liability);
    let payables = Account::new("2.01", "Payables", TypicalBalance::Credit)
        .with_parent(liabilities.id)
        .postable();
    let equity =
        Account::new("3", "Equity", TypicalBalance::Credit).with_category(StatementCategory::Equity);
    let capital = Account::new("3.01", "Share capital", TypicalBalance::Credit)
        .with_parent(equity.id)
        .postable();
    let income =
        Account::new("4", "Income", TypicalBalance::Credit).with_category(StatementCategory::Income);
    let sales = Account::new("4.01", "Sales", TypicalBalance::Credit)
        .with_parent(income.id)
        .postable();
    let expenses = Account::new("5", "Expenses", TypicalBalance::Debit)
        .with_category(StatementCategory::Expense);
    let rent = Account::new("5.01", "Rent", TypicalBalance::Debit)
        .with_parent(expenses.id)
        .postable();
    let clearing = Account::new("9", "Clearing", TypicalBalance::Debit).postable();

    let ids = SampleIds {
        assets: assets.id,
        cash: cash.id,
        receivables: receivables.id,
        liabilities: liabilities.id,
        payables: payables.id,
        equity: equity.id,
        capital: capital.id,
        income: income.id,
        sales: sales.id,
        expenses: expenses.id,
        rent: rent.id,
        clearing: clearing.id,
    };

    let catalog = FakeCatalog::new(vec![
        assets,
        cash,
        receivables,
        liabilities,
        payables,
        equity,
        capital,
        income,
        sales,
        expenses,
        rent,
        clearing,
    ]);
    (catalog, ids)
}

type BalanceKey = (OrganizationId, AccountId, PeriodId);

#[derive(Default)]
pub struct FakeBalanceStore {
    rows: Mutex<HashMap<BalanceKey, AccountPeriodBalance>>,
    revision: Mutex<u64>,
    fail: bool,
}

impl FakeBalanceStore {
    /// A store that rejects every write.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl BalanceStore for FakeBalanceStore {
    fn apply(
        &self,
        ctx: &LedgerContext,
        period_id: PeriodId,
        deltas: &[BalanceDelta],
    ) -> Result<Vec<AccountPeriodBalance>, LedgerError> {
        if self.fail {
            return Err(LedgerError::Storage("store unavailable".to_string()));
        }
        let mut rows = self.rows.lock().unwrap();
        let updated = deltas
            .iter()
            .map(|delta| {
                let row = rows
                    .entry((ctx.organization_id, delta.account_id, period_id))
                    .or_insert_with(|| AccountPeriodBalance::new(delta.account_id, period_id));
                row.total_debit += delta.debit;
                row.total_credit += delta.credit;
                row.clone()
            })
            .collect();
        *self.revision.lock().unwrap() += 1;
        Ok(updated)
    }

    fn get(
        &self,
        ctx: &LedgerContext,
        account_id: AccountId,
        period_id: PeriodId,
    ) -> Option<AccountPeriodBalance> {
        self.rows
            .lock()
            .unwrap()
            .get(&(ctx.organization_id, account_id, period_id))
            .cloned()
    }

    fn snapshot(&self, ctx: &LedgerContext, period_id: PeriodId) -> PeriodSnapshot {
        let rows = self.rows.lock().unwrap();
        PeriodSnapshot {
            revision: *self.revision.lock().unwrap(),
            balances: rows
                .iter()
                .filter(|((org, _, period), _)| *org == ctx.organization_id && *period == period_id)
                .map(|((_, account, _), row)| (*account, row.clone()))
                .collect(),
        }
    }
}

pub struct FakePeriods {
    periods: Vec<AccountingPeriod>,
}

impl FakePeriods {
    pub fn new(periods: Vec<AccountingPeriod>) -> Self {
        Self { periods }
    }
}

impl PeriodCatalog for FakePeriods {
    fn get(&self, _ctx: &LedgerContext, id: PeriodId) -> Option<AccountingPeriod> {
        self.periods.iter().find(|p| p.id == id).cloned()
    }

    fn all(&self, _ctx: &LedgerContext) -> Vec<AccountingPeriod> {
        self.periods.clone()
    }
}

#[derive(Default)]
pub struct FakeRegistry {
    posted: Mutex<HashSet<(OrganizationId, DocumentId)>>,
}

impl DocumentRegistry for FakeRegistry {
    fn claim(&self, ctx: &LedgerContext, document_id: DocumentId) -> bool {
        self.posted
            .lock()
            .unwrap()
            .insert((ctx.organization_id, document_id))
    }

    fn release(&self, ctx: &LedgerContext, document_id: DocumentId) {
        self.posted
            .lock()
            .unwrap()
            .remove(&(ctx.organization_id, document_id));
    }

    fn is_posted(&self, ctx: &LedgerContext, document_id: DocumentId) -> bool {
        self.posted
            .lock()
            .unwrap()
            .contains(&(ctx.organization_id, document_id))
    }
}

#[derive(Default)]
pub struct FakeSnapshots {
    pub current: HashMap<AccountId, InitialBalance>,
}

impl SnapshotSource for FakeSnapshots {
    fn current(&self, _ctx: &LedgerContext) -> HashMap<AccountId, InitialBalance> {
        self.current.clone()
    }
}
