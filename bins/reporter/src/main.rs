//! Tally reporter
//!
//! Seeds a demo organization, posts two months of documents, closes the
//! first month and prints every report as a single JSON document.

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;
use tally_core::LedgerContext;
use tally_core::accounts::{Account, AccountCatalog, StatementCategory, TypicalBalance};
use tally_core::fiscal::AccountingPeriod;
use tally_core::ledger::{Document, DocumentKind, LedgerService};
use tally_core::reports::{ReportCache, ReportService, ReportSettings, TrialBalanceCalculator};
use tally_db::{
    InMemoryAccountCatalog, InMemoryBalanceStore, InMemoryDocumentRegistry,
    InMemoryPeriodCatalog, InMemorySnapshotStore,
};
use tally_shared::AppConfig;
use tally_shared::types::{AccountId, OrganizationId};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Postable accounts of the demo chart.
struct DemoAccounts {
    cash: AccountId,
    receivables: AccountId,
    payables: AccountId,
    capital: AccountId,
    sales: AccountId,
    rent: AccountId,
    salaries: AccountId,
}

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config);

    let ctx = LedgerContext::new(OrganizationId::new());
    let accounts = InMemoryAccountCatalog::new();
    let periods = InMemoryPeriodCatalog::new();
    let balances = InMemoryBalanceStore::new();
    let registry = InMemoryDocumentRegistry::new();
    let snapshots = InMemorySnapshotStore::new();

    let demo = seed_chart(&ctx, &accounts)?;
    let january = AccountingPeriod::open("January 2026", date(2026, 1, 1)?, date(2026, 1, 31)?);
    periods.insert(&ctx, january.clone())?;

    let ledger = LedgerService::new(&accounts, &periods, &balances, &registry);
    let reports = ReportService::new(
        &accounts,
        &periods,
        &balances,
        &snapshots,
        ReportSettings::from(&config),
        ReportCache::with_config(
            config.reporting.cache_capacity,
            config.reporting.cache_ttl_secs,
        ),
    );

    for doc in [
        Document::draft(january.id, DocumentKind::Transaction, "Owner contribution")
            .debit(demo.cash, dec!(10000))
            .credit(demo.capital, dec!(10000)),
        Document::draft(january.id, DocumentKind::Transaction, "Invoice 0001")
            .debit(demo.receivables, dec!(2400))
            .credit(demo.sales, dec!(2400)),
        Document::draft(january.id, DocumentKind::Transaction, "Office rent")
            .debit(demo.rent, dec!(800))
            .credit(demo.payables, dec!(800)),
        Document::draft(january.id, DocumentKind::Transaction, "Payroll")
            .debit(demo.salaries, dec!(1200))
            .credit(demo.cash, dec!(1200)),
    ] {
        ledger.post_document(&ctx, doc)?;
    }

    let january_trial_balance = reports.trial_balance(&ctx, january.id)?;
    periods.close(&ctx, january.id)?;
    snapshots.publish(&ctx, TrialBalanceCalculator::carry_forward(&january_trial_balance));
    info!(period = %january.name, "Period closed and balances carried forward");

    let february = AccountingPeriod::open("February 2026", date(2026, 2, 1)?, date(2026, 2, 28)?);
    periods.insert(&ctx, february.clone())?;

    for doc in [
        Document::draft(february.id, DocumentKind::Transaction, "Collection of invoice 0001")
            .debit(demo.cash, dec!(2400))
            .credit(demo.receivables, dec!(2400)),
        Document::draft(february.id, DocumentKind::Transaction, "Invoice 0002")
            .debit(demo.cash, dec!(3150.50))
            .credit(demo.sales, dec!(3150.50)),
        Document::draft(february.id, DocumentKind::Transaction, "Rent settlement")
            .debit(demo.payables, dec!(800))
            .credit(demo.cash, dec!(800)),
    ] {
        ledger.post_document(&ctx, doc)?;
    }

    let output = json!({
        "january": {
            "trial_balance": &*january_trial_balance,
        },
        "february": {
            "trial_balance": &*reports.trial_balance(&ctx, february.id)?,
            "general_balance": &*reports.general_balance(&ctx, february.id)?,
            "income_statement": &*reports.income_statement(&ctx, february.id)?,
        },
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));

    // Reports go to stdout; logs stay on stderr.
    let registry = tracing_subscriber::registry().with(filter);
    if config.log.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn seed_chart(ctx: &LedgerContext, catalog: &InMemoryAccountCatalog) -> anyhow::Result<DemoAccounts> {
    let assets = Account::new("1", "Assets", TypicalBalance::Debit)
        .with_category(StatementCategory::Asset);
    let cash = Account::new("1.01", "Cash and banks", TypicalBalance::Debit)
        .with_parent(assets.id)
        .postable();
    let receivables = Account::new("1.02", "Accounts receivable", TypicalBalance::Debit)
        .with_parent(assets.id)
        .postable();
    let liabilities = Account::new("2", "Liabilities", TypicalBalance::Credit)
        .with_category(StatementCategory::Liability);
    let payables = Account::new("2.01", "Accounts payable", TypicalBalance::Credit)
        .with_parent(liabilities.id)
        .postable();
    let equity = Account::new("3", "Equity", TypicalBalance::Credit)
        .with_category(StatementCategory::Equity);
    let capital = Account::new("3.01", "Share capital", TypicalBalance::Credit)
        .with_parent(equity.id)
        .postable();
    let income = Account::new("4", "Income", TypicalBalance::Credit)
        .with_category(StatementCategory::Income);
    let sales = Account::new("4.01", "Sales", TypicalBalance::Credit)
        .with_parent(income.id)
        .postable();
    let expenses = Account::new("5", "Expenses", TypicalBalance::Debit)
        .with_category(StatementCategory::Expense);
    let rent = Account::new("5.01", "Rent", TypicalBalance::Debit)
        .with_parent(expenses.id)
        .postable();
    let salaries = Account::new("5.02", "Salaries", TypicalBalance::Debit)
        .with_parent(expenses.id)
        .postable();

    let demo = DemoAccounts {
        cash: cash.id,
        receivables: receivables.id,
        payables: payables.id,
        capital: capital.id,
        sales: sales.id,
        rent: rent.id,
        salaries: salaries.id,
    };

    catalog.load(
        ctx,
        vec![
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
            salaries,
        ],
    )?;
    info!(accounts = catalog.chart(ctx).len(), "Chart of accounts loaded");

    Ok(demo)
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("invalid date {year}-{month}-{day}"))
}
