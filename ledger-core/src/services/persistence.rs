//! Persistence service - synchronizes the registry with an account store
//!
//! Save replaces the store contents with a snapshot of the registry. Load
//! replaces the registry contents with what the store holds. Clear and
//! write are two separate store calls; a failed write leaves the store
//! cleared. Saves are serialized so two clear-then-write pairs never
//! interleave.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::domain::result::{Error, Result};
use crate::domain::{AccountRecord, AccountRegistry};
use crate::ports::AccountStore;

/// Outcome of a save
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveResult {
    /// Name of the store written to
    pub store: String,
    pub saved: usize,
}

/// Outcome of a load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadResult {
    /// Name of the store read from
    pub store: String,
    pub loaded: usize,
    /// Records dropped because their identity was already loaded
    pub skipped: usize,
}

pub struct PersistenceService {
    store: Arc<dyn AccountStore>,
    save_lock: Mutex<()>,
}

impl PersistenceService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self {
            store,
            save_lock: Mutex::new(()),
        }
    }

    /// Replace the store contents with every account in `registry`
    pub fn save(&self, registry: &AccountRegistry) -> Result<SaveResult> {
        let records: Vec<AccountRecord> = registry.iter().map(AccountRecord::from).collect();

        let _guard = self
            .save_lock
            .lock()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))?;
        self.store.clear()?;
        if !records.is_empty() {
            self.store.insert_many(&records)?;
        }

        Ok(SaveResult {
            store: self.store.name().to_string(),
            saved: records.len(),
        })
    }

    /// Replace the registry contents with the stored records
    ///
    /// Records are inserted in stored order through the normal uniqueness
    /// check, so a later duplicate identity is dropped.
    pub fn load(&self, registry: &mut AccountRegistry) -> Result<LoadResult> {
        let records = self.store.fetch_all()?;

        registry.clear();
        let mut loaded = 0;
        let mut skipped = 0;
        for record in records {
            if registry.add(record.into_account()) {
                loaded += 1;
            } else {
                skipped += 1;
            }
        }

        Ok(LoadResult {
            store: self.store.name().to_string(),
            loaded,
            skipped,
        })
    }
}
