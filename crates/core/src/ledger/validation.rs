//! Business rule validation for posting documents.

use rust_decimal::Decimal;

use super::document::{Document, DocumentTotals};
use super::entry::PostingEntry;
use super::error::LedgerError;

/// Validates that a set of entries forms a balanced document.
///
/// Rules, checked in order:
/// 1. at least one entry, and at least two
/// 2. no negative amounts
/// 3. neither side's sum overflows
/// 4. sum(debit) == sum(credit)
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_entries(entries: &[PostingEntry]) -> Result<DocumentTotals, LedgerError> {
    if entries.is_empty() {
        return Err(LedgerError::EmptyDocument);
    }
    if entries.len() < 2 {
        return Err(LedgerError::InsufficientEntries);
    }

    if let Some(entry) = entries.iter().find(|e| e.amount < Decimal::ZERO) {
        return Err(LedgerError::NegativeAmount {
            account_id: entry.account_id,
            amount: entry.amount,
        });
    }

    let totals = DocumentTotals::from_entries(entries)?;
    if !totals.is_balanced {
        return Err(LedgerError::UnbalancedDocument {
            debit: totals.debit,
            credit: totals.credit,
        });
    }

    Ok(totals)
}

/// Validates a whole document: entry rules plus period consistency.
///
/// # Errors
///
/// Returns `PeriodMismatch` when an entry names a different period than
/// its document, otherwise the errors of [`validate_entries`].
pub fn validate_document(document: &Document) -> Result<DocumentTotals, LedgerError> {
    if let Some(entry) = document
        .entries
        .iter()
        .find(|e| e.period_id != document.period_id)
    {
        return Err(LedgerError::PeriodMismatch {
            expected: document.period_id,
            found: entry.period_id,
        });
    }
    validate_entries(&document.entries)
}
