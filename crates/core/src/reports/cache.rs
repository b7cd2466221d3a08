//! Report result caching using Moka.
//!
//! Entries are keyed by the store revisions they were computed from. Any
//! committed posting bumps the balance revision and any chart reload bumps
//! the chart revision, so a stale report is never served: it simply stops
//! being looked up and ages out.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tally_shared::types::{OrganizationId, PeriodId};

use crate::statements::{GeneralBalance, IncomeStatement};

use super::types::TrialBalanceReport;

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: u64 = 100;

/// Default time-to-live for cache entries (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

/// Which report a cache entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Trial balance.
    TrialBalance,
    /// General balance.
    GeneralBalance,
    /// Income statement.
    IncomeStatement,
}

/// Cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportKey {
    /// Organization.
    pub organization_id: OrganizationId,
    /// Period.
    pub period_id: PeriodId,
    /// Balance store revision.
    pub balance_revision: u64,
    /// Initial snapshot revision.
    pub snapshot_revision: u64,
    /// Chart of accounts revision.
    pub chart_revision: u64,
    /// Report kind.
    pub kind: ReportKind,
}

#[derive(Clone)]
enum CachedReport {
    TrialBalance(Arc<TrialBalanceReport>),
    GeneralBalance(Arc<GeneralBalance>),
    IncomeStatement(Arc<IncomeStatement>),
}

/// Cache for computed reports.
///
/// Cheap to clone; clones share entries.
#[derive(Clone)]
pub struct ReportCache {
    cache: Cache<ReportKey, CachedReport>,
}

impl ReportCache {
    /// Creates a cache with default settings.
    ///
    /// Default: 100 entries max, 5 minute TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with custom configuration.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Returns a cached trial balance.
    #[must_use]
    pub fn trial_balance(&self, key: &ReportKey) -> Option<Arc<TrialBalanceReport>> {
        match self.cache.get(key)? {
            CachedReport::TrialBalance(report) => Some(report),
            _ => None,
        }
    }

    /// Returns a cached general balance.
    #[must_use]
    pub fn general_balance(&self, key: &ReportKey) -> Option<Arc<GeneralBalance>> {
        match self.cache.get(key)? {
            CachedReport::GeneralBalance(report) => Some(report),
            _ => None,
        }
    }

    /// Returns a cached income statement.
    #[must_use]
    pub fn income_statement(&self, key: &ReportKey) -> Option<Arc<IncomeStatement>> {
        match self.cache.get(key)? {
            CachedReport::IncomeStatement(report) => Some(report),
            _ => None,
        }
    }

    /// Stores a trial balance.
    pub fn insert_trial_balance(&self, key: ReportKey, report: Arc<TrialBalanceReport>) {
        self.cache.insert(key, CachedReport::TrialBalance(report));
    }

    /// Stores a general balance.
    pub fn insert_general_balance(&self, key: ReportKey, report: Arc<GeneralBalance>) {
        self.cache.insert(key, CachedReport::GeneralBalance(report));
    }

    /// Stores an income statement.
    pub fn insert_income_statement(&self, key: ReportKey, report: Arc<IncomeStatement>) {
        self.cache.insert(key, CachedReport::IncomeStatement(report));
    }

    /// Invalidates all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs cache maintenance tasks.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new()
    }
}
