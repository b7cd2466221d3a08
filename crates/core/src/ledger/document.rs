//! Posting document aggregate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, DocumentId, PeriodId};

use super::entry::{Direction, PostingEntry};
use super::error::LedgerError;

/// Document classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Ordinary journal transaction.
    Transaction,
    /// Period adjustment.
    Adjustment,
    /// Debit note.
    DebitNote,
    /// Credit note.
    CreditNote,
}

/// Document status.
///
/// `Draft` → `Posted` is the only transition, and `Posted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Document is being drafted and can be modified.
    Draft,
    /// Document has been applied to the ledger (immutable).
    Posted,
}

impl DocumentStatus {
    /// Returns true if the document is immutable.
    #[must_use]
    pub fn is_immutable(self) -> bool {
        matches!(self, Self::Posted)
    }
}

/// A balanced group of entries applied atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier.
    pub id: DocumentId,
    /// The period every entry is recorded in.
    pub period_id: PeriodId,
    /// Document classification.
    pub kind: DocumentKind,
    /// Current status.
    pub status: DocumentStatus,
    /// Document description.
    pub description: String,
    /// Posting entries.
    pub entries: Vec<PostingEntry>,
}

impl Document {
    /// Creates an empty draft document.
    #[must_use]
    pub fn draft(period_id: PeriodId, kind: DocumentKind, description: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new(),
            period_id,
            kind,
            status: DocumentStatus::Draft,
            description: description.into(),
            entries: Vec::new(),
        }
    }

    /// Appends a debit line.
    #[must_use]
    pub fn debit(mut self, account_id: AccountId, amount: Decimal) -> Self {
        self.entries
            .push(PostingEntry::debit(account_id, amount, self.period_id));
        self
    }

    /// Appends a credit line.
    #[must_use]
    pub fn credit(mut self, account_id: AccountId, amount: Decimal) -> Self {
        self.entries
            .push(PostingEntry::credit(account_id, amount, self.period_id));
        self
    }

    /// Returns the debit and credit sums of the document.
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` if either sum leaves the decimal range.
    pub fn totals(&self) -> Result<DocumentTotals, LedgerError> {
        DocumentTotals::from_entries(&self.entries)
    }
}

/// Document totals for validation and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTotals {
    /// Total debit amount.
    pub debit: Decimal,
    /// Total credit amount.
    pub credit: Decimal,
    /// Whether the document is balanced (debits == credits).
    pub is_balanced: bool,
}

impl DocumentTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: debit == credit,
        }
    }

    /// Sums a set of entries with checked arithmetic.
    ///
    /// # Errors
    ///
    /// Returns `AmountOverflow` naming the side whose sum overflowed.
    pub fn from_entries(entries: &[PostingEntry]) -> Result<Self, LedgerError> {
        let mut debit = Decimal::ZERO;
        let mut credit = Decimal::ZERO;
        for entry in entries {
            let side = match entry.direction {
                Direction::Debit => &mut debit,
                Direction::Credit => &mut credit,
            };
            *side = side
                .checked_add(entry.amount)
                .ok_or(LedgerError::AmountOverflow(entry.direction))?;
        }
        Ok(Self::new(debit, credit))
    }
}
