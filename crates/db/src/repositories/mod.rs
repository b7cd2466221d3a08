//! Repository implementations.
//!
//! Every repository keys its data by organization, so two organizations
//! never observe each other's rows.

pub mod account;
pub mod balance;
pub mod document;
pub mod fiscal;
pub mod snapshot;

pub use account::InMemoryAccountCatalog;
pub use balance::InMemoryBalanceStore;
pub use document::InMemoryDocumentRegistry;
pub use fiscal::{FiscalError, InMemoryPeriodCatalog};
pub use snapshot::InMemorySnapshotStore;
