//! Shared fixtures for the storage integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use tally_core::LedgerContext;
use tally_core::accounts::{Account, StatementCategory, TypicalBalance};
use tally_core::fiscal::AccountingPeriod;
use tally_core::ledger::LedgerService;
use tally_core::reports::{ReportCache, ReportService, ReportSettings};
use tally_db::{
    InMemoryAccountCatalog, InMemoryBalanceStore, InMemoryDocumentRegistry,
    InMemoryPeriodCatalog, InMemorySnapshotStore,
};
use tally_shared::types::{AccountId, OrganizationId};

/// Ids of the seeded chart.
pub struct Chart {
    pub assets: AccountId,
    pub current_assets: AccountId,
    pub cash: AccountId,
    pub bank: AccountId,
    pub liabilities: AccountId,
    pub payables: AccountId,
    pub equity: AccountId,
    pub capital: AccountId,
    pub income: AccountId,
    pub sales: AccountId,
    pub expenses: AccountId,
    pub rent: AccountId,
    pub suspense: AccountId,
}

/// One organization's ledger backed by the in-memory repositories.
pub struct Ledger {
    pub ctx: LedgerContext,
    pub accounts: InMemoryAccountCatalog,
    pub periods: InMemoryPeriodCatalog,
    pub balances: InMemoryBalanceStore,
    pub registry: InMemoryDocumentRegistry,
    pub snapshots: InMemorySnapshotStore,
    pub chart: Chart,
    pub period: AccountingPeriod,
}

impl Ledger {
    pub fn new() -> Self {
        let ctx = LedgerContext::new(OrganizationId::new());

        let assets = Account::new("1", "Assets", TypicalBalance::Debit)
            .with_category(StatementCategory::Asset);
        let current_assets =
            Account::new("1.1", "Current assets", TypicalBalance::Debit).with_parent(assets.id);
        let cash = Account::new("1.1.01", "Cash", TypicalBalance::Debit)
            .with_parent(current_assets.id)
            .postable();
        let bank = Account::new("1.1.02", "Bank", TypicalBalance::Debit)
            .with_parent(current_assets.id)
            .postable();
        let liabilities = Account::new("2", "Liabilities", TypicalBalance::Credit)
            .with_category(StatementCategory::Liability);
        let payables = Account::new("2.1", "Payables", TypicalBalance::Credit)
            .with_parent(liabilities.id)
            .postable();
        let equity = Account::new("3", "Equity", TypicalBalance::Credit)
            .with_category(StatementCategory::Equity);
        let capital = Account::new("3.1", "Share capital", TypicalBalance::Credit)
            .with_parent(equity.id)
            .postable();
        let income = Account::new("4", "Income", TypicalBalance::Credit)
            .with_category(StatementCategory::Income);
        let sales = Account::new("4.1", "Sales", TypicalBalance::Credit)
            .with_parent(income.id)
            .postable();
        let expenses = Account::new("5", "Expenses", TypicalBalance::Debit)
            .with_category(StatementCategory::Expense);
        let rent = Account::new("5.1", "Rent", TypicalBalance::Debit)
            .with_parent(expenses.id)
            .postable();
        let suspense = Account::new("9", "Suspense", TypicalBalance::Debit).postable();

        let chart = Chart {
            assets: assets.id,
            current_assets: current_assets.id,
            cash: cash.id,
            bank: bank.id,
            liabilities: liabilities.id,
            payables: payables.id,
            equity: equity.id,
            capital: capital.id,
            income: income.id,
            sales: sales.id,
            expenses: expenses.id,
            rent: rent.id,
            suspense: suspense.id,
        };

        let accounts = InMemoryAccountCatalog::new();
        accounts
            .load(
                &ctx,
                vec![
                    assets,
                    current_assets,
                    cash,
                    bank,
                    liabilities,
                    payables,
                    equity,
                    capital,
                    income,
                    sales,
                    expenses,
                    rent,
                    suspense,
                ],
            )
            .unwrap();

        let period = AccountingPeriod::open(
            "January 2026",
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        );
        let periods = InMemoryPeriodCatalog::new();
        periods.insert(&ctx, period.clone()).unwrap();

        Self {
            ctx,
            accounts,
            periods,
            balances: InMemoryBalanceStore::new(),
            registry: InMemoryDocumentRegistry::new(),
            snapshots: InMemorySnapshotStore::new(),
            chart,
            period,
        }
    }

    pub fn ledger(
        &self,
    ) -> LedgerService<
        '_,
        InMemoryAccountCatalog,
        InMemoryPeriodCatalog,
        InMemoryBalanceStore,
        InMemoryDocumentRegistry,
    > {
        LedgerService::new(&self.accounts, &self.periods, &self.balances, &self.registry)
    }

    pub fn reports(
        &self,
    ) -> ReportService<
        '_,
        InMemoryAccountCatalog,
        InMemoryPeriodCatalog,
        InMemoryBalanceStore,
        InMemorySnapshotStore,
    > {
        ReportService::new(
            &self.accounts,
            &self.periods,
            &self.balances,
            &self.snapshots,
            ReportSettings::default(),
            ReportCache::new(),
        )
    }
}
