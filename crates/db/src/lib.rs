//! Storage layer with in-memory repositories.
//!
//! This crate provides implementations of the core provider traits:
//! - Control balances with per-key serialized upserts and consistent snapshots
//! - Chart of accounts and accounting periods per organization
//! - The "current" initial balance snapshot
//! - The registry of posted documents

pub mod repositories;

pub use repositories::{
    FiscalError, InMemoryAccountCatalog, InMemoryBalanceStore, InMemoryDocumentRegistry,
    InMemoryPeriodCatalog, InMemorySnapshotStore,
};
