//! Report generation service.
//!
//! Reads committed balances through a single store snapshot per report, so
//! a report never mixes balances from before and after a posting.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tally_shared::AppConfig;
use tally_shared::types::{AccountId, PeriodId};
use tracing::debug;

use super::cache::{ReportCache, ReportKey, ReportKind};
use super::error::ReportError;
use super::snapshot::SnapshotSource;
use super::trial_balance::TrialBalanceCalculator;
use super::types::TrialBalanceReport;
use crate::accounts::{Account, AccountCatalog, ChartOfAccounts};
use crate::context::LedgerContext;
use crate::fiscal::{AccountingPeriod, PeriodCatalog};
use crate::hierarchy::HierarchyRollup;
use crate::ledger::{BalanceStore, PeriodSnapshot};
use crate::statements::{GeneralBalance, IncomeStatement, StatementClassifier};

/// Presentation and tuning settings for reports.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    /// Currency code attached to reports.
    pub currency: String,
    /// Decimal places amounts are rounded to.
    pub amount_scale: u32,
    /// Description of the synthetic net-profit line.
    pub net_profit_label: String,
    /// Minimum number of accounts before the trial balance runs in parallel.
    pub parallel_threshold: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ReportSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            currency: config.ledger.currency.clone(),
            amount_scale: config.ledger.amount_scale,
            net_profit_label: config.reporting.net_profit_label.clone(),
            parallel_threshold: config.reporting.parallel_threshold,
        }
    }
}

/// Service for generating financial reports.
pub struct ReportService<'a, C, P, S, I> {
    accounts: &'a C,
    periods: &'a P,
    store: &'a S,
    snapshots: &'a I,
    settings: ReportSettings,
    cache: ReportCache,
}

impl<'a, C, P, S, I> ReportService<'a, C, P, S, I>
where
    C: AccountCatalog,
    P: PeriodCatalog,
    S: BalanceStore,
    I: SnapshotSource,
{
    /// Creates a report service.
    #[must_use]
    pub fn new(
        accounts: &'a C,
        periods: &'a P,
        store: &'a S,
        snapshots: &'a I,
        settings: ReportSettings,
        cache: ReportCache,
    ) -> Self {
        Self {
            accounts,
            periods,
            store,
            snapshots,
            settings,
            cache,
        }
    }

    /// Trial balance over every postable account, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` if the period does not exist.
    pub fn trial_balance(
        &self,
        ctx: &LedgerContext,
        period_id: PeriodId,
    ) -> Result<Arc<TrialBalanceReport>, ReportError> {
        self.period(ctx, period_id)?;
        let (key, balances) = self.read(ctx, period_id, ReportKind::TrialBalance);
        if let Some(cached) = self.cache.trial_balance(&key) {
            debug!(period_id = %period_id, revision = key.balance_revision, "Trial balance cache hit");
            return Ok(cached);
        }

        let chart = self.accounts.chart(ctx);
        let report = Arc::new(self.calculate(period_id, &chart.postable(), ctx, &balances)?);
        self.cache.insert_trial_balance(key, Arc::clone(&report));

        debug!(
            organization_id = %ctx.organization_id,
            period_id = %period_id,
            rows = report.rows.len(),
            is_balanced = report.totals.is_balanced,
            "Trial balance generated"
        );
        Ok(report)
    }

    /// Trial balance restricted to the given postable accounts.
    ///
    /// Rows are ordered by account code. Not cached.
    ///
    /// # Errors
    ///
    /// - `PeriodNotFound` if the period does not exist
    /// - `AccountNotFound` if an id is not a postable account of the chart
    /// - `AmountOverflow` if a balance leaves the decimal range
    pub fn trial_balance_for_accounts(
        &self,
        ctx: &LedgerContext,
        period_id: PeriodId,
        account_ids: &[AccountId],
    ) -> Result<TrialBalanceReport, ReportError> {
        self.period(ctx, period_id)?;
        let chart = self.accounts.chart(ctx);

        let mut accounts: Vec<&Account> = account_ids
            .iter()
            .map(|id| {
                chart
                    .get(id)
                    .filter(|account| account.supports_posting)
                    .ok_or(ReportError::AccountNotFound(*id))
            })
            .collect::<Result<_, _>>()?;
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        accounts.dedup_by_key(|account| account.id);

        let balances = self.store.snapshot(ctx, period_id);
        self.calculate(period_id, &accounts, ctx, &balances)
    }

    /// General balance: initial snapshot plus the period's movement, rolled
    /// up and classified.
    ///
    /// # Errors
    ///
    /// - `PeriodNotFound` if the period does not exist
    /// - `MalformedHierarchy` if the chart is not a forest
    /// - `AmountOverflow` if a total leaves the decimal range
    pub fn general_balance(
        &self,
        ctx: &LedgerContext,
        period_id: PeriodId,
    ) -> Result<Arc<GeneralBalance>, ReportError> {
        self.period(ctx, period_id)?;
        let (key, balances) = self.read(ctx, period_id, ReportKind::GeneralBalance);
        if let Some(cached) = self.cache.general_balance(&key) {
            debug!(period_id = %period_id, revision = key.balance_revision, "General balance cache hit");
            return Ok(cached);
        }

        let chart = self.accounts.chart(ctx);
        let mut direct = Self::period_nets(&balances);
        for (account_id, initial) in self.snapshots.current(ctx) {
            let typical = chart
                .get(&account_id)
                .map_or(initial.typical_balance, |account| account.typical_balance);
            let total = direct.entry(account_id).or_default();
            *total = total
                .checked_add(initial.columns(typical).net())
                .ok_or_else(|| {
                    ReportError::AmountOverflow(format!("balance of account {account_id}"))
                })?;
        }
        let rolled_up = HierarchyRollup::roll_up_chart(&chart, &direct)?;

        let report = Arc::new(
            StatementClassifier::general_balance(
                &chart,
                &direct,
                &rolled_up,
                &self.settings.net_profit_label,
            )?
            .rounded(self.settings.amount_scale),
        );
        self.cache.insert_general_balance(key, Arc::clone(&report));

        debug!(
            organization_id = %ctx.organization_id,
            period_id = %period_id,
            is_balanced = report.is_balanced,
            uncategorized = report.uncategorized.len(),
            "General balance generated"
        );
        Ok(report)
    }

    /// Income statement over the period's movement only.
    ///
    /// # Errors
    ///
    /// - `PeriodNotFound` if the period does not exist
    /// - `MalformedHierarchy` if the chart is not a forest
    /// - `AmountOverflow` if a total leaves the decimal range
    pub fn income_statement(
        &self,
        ctx: &LedgerContext,
        period_id: PeriodId,
    ) -> Result<Arc<IncomeStatement>, ReportError> {
        self.period(ctx, period_id)?;
        let (key, balances) = self.read(ctx, period_id, ReportKind::IncomeStatement);
        if let Some(cached) = self.cache.income_statement(&key) {
            debug!(period_id = %period_id, revision = key.balance_revision, "Income statement cache hit");
            return Ok(cached);
        }

        let chart = self.accounts.chart(ctx);
        let direct = Self::period_nets(&balances);
        let rolled_up = HierarchyRollup::roll_up_chart(&chart, &direct)?;

        let report = Arc::new(
            StatementClassifier::income_statement(&chart, &direct, &rolled_up)?
                .rounded(self.settings.amount_scale),
        );
        self.cache.insert_income_statement(key, Arc::clone(&report));

        debug!(
            organization_id = %ctx.organization_id,
            period_id = %period_id,
            net_profit = %report.net_profit,
            "Income statement generated"
        );
        Ok(report)
    }

    /// Rolled-up period nets (debit minus credit) for every account.
    ///
    /// # Errors
    ///
    /// - `PeriodNotFound` if the period does not exist
    /// - `MalformedHierarchy` if the chart is not a forest
    pub fn rolled_up_balances(
        &self,
        ctx: &LedgerContext,
        period_id: PeriodId,
    ) -> Result<HashMap<AccountId, Decimal>, ReportError> {
        self.period(ctx, period_id)?;
        let chart: Arc<ChartOfAccounts> = self.accounts.chart(ctx);
        let balances = self.store.snapshot(ctx, period_id);
        Ok(HierarchyRollup::roll_up_chart(&chart, &Self::period_nets(&balances))?)
    }

    fn period(
        &self,
        ctx: &LedgerContext,
        period_id: PeriodId,
    ) -> Result<AccountingPeriod, ReportError> {
        self.periods
            .get(ctx, period_id)
            .ok_or(ReportError::PeriodNotFound(period_id))
    }

    /// Takes the balance snapshot and the cache key matching it.
    fn read(
        &self,
        ctx: &LedgerContext,
        period_id: PeriodId,
        kind: ReportKind,
    ) -> (ReportKey, PeriodSnapshot) {
        let snapshot_revision = self.snapshots.revision(ctx);
        let chart_revision = self.accounts.revision(ctx);
        let balances = self.store.snapshot(ctx, period_id);
        let key = ReportKey {
            organization_id: ctx.organization_id,
            period_id,
            balance_revision: balances.revision,
            snapshot_revision,
            chart_revision,
            kind,
        };
        (key, balances)
    }

    fn calculate(
        &self,
        period_id: PeriodId,
        accounts: &[&Account],
        ctx: &LedgerContext,
        balances: &PeriodSnapshot,
    ) -> Result<TrialBalanceReport, ReportError> {
        Ok(TrialBalanceCalculator::calculate(
            period_id,
            &self.settings.currency,
            accounts,
            &self.snapshots.current(ctx),
            &balances.balances,
            self.settings.parallel_threshold,
        )?
        .rounded(self.settings.amount_scale))
    }

    fn period_nets(balances: &PeriodSnapshot) -> HashMap<AccountId, Decimal> {
        balances
            .balances
            .iter()
            .map(|(account_id, row)| (*account_id, row.net()))
            .collect()
    }
}
