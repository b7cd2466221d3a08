//! Concurrent posting tests.
//!
//! These tests verify that:
//! - Concurrent postings on the same accounts lose no update
//! - Snapshots taken while postings are in flight only see whole documents
//! - A document posted from several threads at once is applied exactly once

mod common;

use std::sync::Barrier;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use common::Ledger;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_core::ledger::{BalanceStore, Document, DocumentKind, LedgerError};

const THREADS: usize = 8;
const DOCUMENTS_PER_THREAD: usize = 125;

#[test]
fn test_no_lost_updates_on_shared_rows() {
    let ledger = Ledger::new();
    let chart = &ledger.chart;
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                let service = ledger.ledger();
                barrier.wait();
                for _ in 0..DOCUMENTS_PER_THREAD {
                    let doc = Document::draft(ledger.period.id, DocumentKind::Transaction, "Sale")
                        .debit(chart.cash, dec!(1.25))
                        .credit(chart.sales, dec!(1.25));
                    service.post_document(&ledger.ctx, doc).unwrap();
                }
            });
        }
    });

    let total = Decimal::from(THREADS * DOCUMENTS_PER_THREAD) * dec!(1.25);
    let cash = ledger
        .balances
        .get(&ledger.ctx, chart.cash, ledger.period.id)
        .unwrap();
    let sales = ledger
        .balances
        .get(&ledger.ctx, chart.sales, ledger.period.id)
        .unwrap();
    assert_eq!(cash.total_debit, total);
    assert_eq!(sales.total_credit, total);
    assert_eq!(ledger.registry.len(), THREADS * DOCUMENTS_PER_THREAD);
}

#[test]
fn test_snapshots_never_observe_partial_documents() {
    let ledger = Ledger::new();
    let chart = &ledger.chart;
    let done = AtomicBool::new(false);
    let snapshots_taken = AtomicUsize::new(0);

    thread::scope(|scope| {
        let writers: Vec<_> = (0..THREADS)
            .map(|i| {
                let ledger = &ledger;
                scope.spawn(move || {
                    let service = ledger.ledger();
                    let target = if i % 2 == 0 { chart.cash } else { chart.bank };
                    for _ in 0..DOCUMENTS_PER_THREAD {
                        let doc = Document::draft(ledger.period.id, DocumentKind::Transaction, "Split")
                            .debit(target, dec!(3))
                            .credit(chart.sales, dec!(2))
                            .credit(chart.capital, dec!(1));
                        service.post_document(&ledger.ctx, doc).unwrap();
                    }
                })
            })
            .collect();

        scope.spawn(|| {
            loop {
                let finished = done.load(Ordering::Acquire);
                let snapshot = ledger.balances.snapshot(&ledger.ctx, ledger.period.id);
                let net: Decimal = snapshot.balances.values().map(|row| row.net()).sum();
                assert_eq!(net, Decimal::ZERO, "snapshot at revision {} is unbalanced", snapshot.revision);
                snapshots_taken.fetch_add(1, Ordering::Relaxed);
                if finished {
                    break;
                }
            }
        });

        for writer in writers {
            writer.join().unwrap();
        }
        done.store(true, Ordering::Release);
    });

    assert!(snapshots_taken.load(Ordering::Relaxed) > 0);
    let snapshot = ledger.balances.snapshot(&ledger.ctx, ledger.period.id);
    let documents = u64::try_from(THREADS * DOCUMENTS_PER_THREAD).unwrap();
    assert_eq!(snapshot.revision, documents);
}

#[test]
fn test_racing_duplicate_posting_applies_once() {
    let ledger = Ledger::new();
    let chart = &ledger.chart;
    let doc = Document::draft(ledger.period.id, DocumentKind::Transaction, "Contested")
        .debit(chart.cash, dec!(40))
        .credit(chart.capital, dec!(40));
    let barrier = Barrier::new(THREADS);
    let accepted = AtomicUsize::new(0);
    let rejected = AtomicUsize::new(0);

    thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                let service = ledger.ledger();
                barrier.wait();
                match service.post_document(&ledger.ctx, doc.clone()) {
                    Ok(_) => accepted.fetch_add(1, Ordering::SeqCst),
                    Err(LedgerError::AlreadyPosted(_)) => rejected.fetch_add(1, Ordering::SeqCst),
                    Err(other) => panic!("unexpected error: {other}"),
                };
            });
        }
    });

    assert_eq!(accepted.load(Ordering::SeqCst), 1);
    assert_eq!(rejected.load(Ordering::SeqCst), THREADS - 1);
    let cash = ledger
        .balances
        .get(&ledger.ctx, chart.cash, ledger.period.id)
        .unwrap();
    assert_eq!(cash.total_debit, dec!(40));
}

#[test]
fn test_independent_periods_in_parallel() {
    let ledger = Ledger::new();
    let chart = &ledger.chart;
    let other_org = Ledger::new();

    thread::scope(|scope| {
        for target in [&ledger, &other_org] {
            scope.spawn(move || {
                let service = target.ledger();
                for _ in 0..DOCUMENTS_PER_THREAD {
                    let doc = Document::draft(target.period.id, DocumentKind::Transaction, "Rent")
                        .debit(target.chart.rent, dec!(2))
                        .credit(target.chart.cash, dec!(2));
                    service.post_document(&target.ctx, doc).unwrap();
                }
            });
        }
    });

    let rent = ledger
        .balances
        .get(&ledger.ctx, chart.rent, ledger.period.id)
        .unwrap();
    assert_eq!(rent.total_debit, dec!(250));
}
