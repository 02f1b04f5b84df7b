//! Concurrent access tests
//!
//! Many threads share one registry through the ledger service. Every
//! mutation must be applied exactly once and duplicate registrations must
//! lose cleanly, however the threads interleave.
//!
//! Run with: cargo test --test concurrent_access_test -- --nocapture

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use ledger_core::adapters::duckdb::DuckDbAccountStore;
use ledger_core::adapters::memory::InMemoryAccountStore;
use ledger_core::adapters::outbox::OutboxNotifier;
use ledger_core::config::Config;
use ledger_core::domain::result::Result;
use ledger_core::ports::TaxRegistrar;
use ledger_core::{Error, LedgerContext, LEDGER_DB_FILENAME};

/// Number of concurrent threads for stress tests
const THREAD_COUNT: usize = 8;

/// Number of iterations per thread
const ITERATIONS_PER_THREAD: usize = 25;

struct ApproveAll;

impl TaxRegistrar for ApproveAll {
    fn name(&self) -> &str {
        "approve-all"
    }

    fn is_active(&self, _nip: &str, _date: NaiveDate) -> Result<bool> {
        Ok(true)
    }
}

fn create_context(temp_dir: &TempDir) -> Arc<LedgerContext> {
    Arc::new(LedgerContext::with_components(
        Config::default(),
        Arc::new(InMemoryAccountStore::new()),
        Arc::new(ApproveAll),
        Arc::new(OutboxNotifier::new(temp_dir.path().join("outbox"), "ledger@localhost")),
    ))
}

/// 11-digit PESEL unique per thread
fn pesel_for(thread_id: usize) -> String {
    format!("900101{:05}", thread_id)
}

/// Test: all threads race to register the same identity; exactly one wins
#[test]
fn test_concurrent_duplicate_registration() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_context(&temp_dir);
    let barrier = Arc::new(Barrier::new(THREAD_COUNT));
    let created = Arc::new(AtomicUsize::new(0));
    let duplicates = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|i| {
            let ctx = Arc::clone(&ctx);
            let barrier = Arc::clone(&barrier);
            let created = Arc::clone(&created);
            let duplicates = Arc::clone(&duplicates);

            thread::spawn(move || {
                barrier.wait();
                match ctx.ledger_service.create_personal(
                    &format!("Holder{}", i),
                    "Racer",
                    Some("89092909825"),
                    None,
                ) {
                    Ok(_) => created.fetch_add(1, Ordering::SeqCst),
                    Err(Error::DuplicateIdentity(_)) => duplicates.fetch_add(1, Ordering::SeqCst),
                    Err(e) => panic!("Unexpected error: {}", e),
                };
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(created.load(Ordering::SeqCst), 1);
    assert_eq!(duplicates.load(Ordering::SeqCst), THREAD_COUNT - 1);
    assert_eq!(ctx.ledger_service.count().unwrap(), 1);
}

/// Test: concurrent transfers on one account are never lost
#[test]
fn test_concurrent_transfers_on_shared_account() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_context(&temp_dir);
    ctx.ledger_service
        .create_personal("Jan", "Nowak", Some("89092909825"), None)
        .unwrap();

    let barrier = Arc::new(Barrier::new(THREAD_COUNT));
    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                for _ in 0..ITERATIONS_PER_THREAD {
                    ctx.ledger_service
                        .transfer("89092909825", "incoming", dec!(10))
                        .unwrap();
                    ctx.ledger_service
                        .transfer("89092909825", "outgoing", dec!(4))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let account = ctx.ledger_service.get("89092909825").unwrap();
    let rounds = Decimal::from(THREAD_COUNT * ITERATIONS_PER_THREAD);
    assert_eq!(account.balance, rounds * dec!(6));
    assert_eq!(account.history.len(), THREAD_COUNT * ITERATIONS_PER_THREAD * 2);
    assert_eq!(account.history.iter().sum::<Decimal>(), account.balance);
}

/// Test: concurrent overdraft attempts never drive a balance negative
#[test]
fn test_concurrent_withdrawals_respect_balance() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_context(&temp_dir);
    ctx.ledger_service
        .create_personal("Jan", "Nowak", Some("89092909825"), None)
        .unwrap();
    ctx.ledger_service
        .transfer("89092909825", "incoming", dec!(100))
        .unwrap();

    let barrier = Arc::new(Barrier::new(THREAD_COUNT));
    let succeeded = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            let barrier = Arc::clone(&barrier);
            let succeeded = Arc::clone(&succeeded);

            thread::spawn(move || {
                barrier.wait();
                for _ in 0..ITERATIONS_PER_THREAD {
                    match ctx.ledger_service.transfer("89092909825", "outgoing", dec!(3)) {
                        Ok(_) => {
                            succeeded.fetch_add(1, Ordering::SeqCst);
                        }
                        Err(Error::InsufficientFunds { .. }) => {}
                        Err(e) => panic!("Unexpected error: {}", e),
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // 100 / 3 = 33 withdrawals fit, leaving 1
    assert_eq!(succeeded.load(Ordering::SeqCst), 33);
    assert_eq!(ctx.ledger_service.get("89092909825").unwrap().balance, dec!(1));
}

/// Test: saves interleaved with registrations always persist a consistent snapshot
#[test]
fn test_concurrent_save_while_registering() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join(LEDGER_DB_FILENAME);
    let ctx = Arc::new(LedgerContext::with_components(
        Config::default(),
        Arc::new(DuckDbAccountStore::new(&db_path).unwrap()),
        Arc::new(ApproveAll),
        Arc::new(OutboxNotifier::new(temp_dir.path().join("outbox"), "ledger@localhost")),
    ));

    let barrier = Arc::new(Barrier::new(THREAD_COUNT));
    let handles: Vec<_> = (0..THREAD_COUNT)
        .map(|i| {
            let ctx = Arc::clone(&ctx);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                if i % 2 == 0 {
                    ctx.ledger_service
                        .create_personal("Thread", "Holder", Some(&pesel_for(i)), None)
                        .unwrap();
                } else {
                    ctx.save().unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    ctx.save().unwrap();
    ctx.load().unwrap();
    assert_eq!(ctx.ledger_service.count().unwrap(), THREAD_COUNT / 2);
}
