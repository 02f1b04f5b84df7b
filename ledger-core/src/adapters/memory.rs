//! In-memory account store
//!
//! Holds records in a vector for tests and embedders that do not need
//! durability. Writes can be made to fail to exercise the
//! clear-then-write failure path.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::domain::result::{Error, Result};
use crate::domain::AccountRecord;
use crate::ports::AccountStore;

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    records: Mutex<Vec<AccountRecord>>,
    fail_writes: AtomicBool,
    write_calls: AtomicUsize,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `records`
    pub fn with_records(records: Vec<AccountRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Make subsequent `insert_many` calls fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `insert_many` calls made so far, failed ones included
    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<AccountRecord>>> {
        self.records
            .lock()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))
    }
}

impl AccountStore for InMemoryAccountStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }

    fn insert_many(&self, records: &[AccountRecord]) -> Result<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::database("simulated write failure"));
        }
        self.lock()?.extend_from_slice(records);
        Ok(())
    }

    fn fetch_all(&self) -> Result<Vec<AccountRecord>> {
        Ok(self.lock()?.clone())
    }
}
