//! Ledger Core - Business logic for personal and business bank accounts
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (Account, CompanyAccount, AccountRegistry, etc.)
//! - **ports**: Trait definitions for external dependencies (AccountStore, TaxRegistrar, Notifier)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (DuckDB, VAT whitelist, outbox)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::Result;

use adapters::duckdb::DuckDbAccountStore;
use adapters::outbox::OutboxNotifier;
use adapters::registrar::MfRegistrarClient;
use config::Config;
use ports::{AccountStore, Notifier, TaxRegistrar};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{
    Account, AccountKind, AccountRecord, AccountRegistry, CompanyAccount, HistoryReport, Identity,
    LedgerAccount, TransferKind, Transfers,
};

/// Database file holding saved accounts
pub const LEDGER_DB_FILENAME: &str = "ledger.duckdb";

/// Directory, inside the ledger directory, that reports are written to
pub const OUTBOX_DIRNAME: &str = "outbox";

/// Main context for ledger operations
///
/// Owns the shared registry and wires it to the store, the registrar and
/// the notifier. Nothing here is process-global; every context is
/// independent.
pub struct LedgerContext {
    pub config: Config,
    pub registry: Arc<RwLock<AccountRegistry>>,
    pub ledger_service: LedgerService,
    pub persistence_service: PersistenceService,
    pub report_service: ReportService,
}

impl LedgerContext {
    /// Create a context backed by the ledger directory
    ///
    /// Accounts are saved to `ledger.duckdb`, reports go to the `outbox`
    /// subdirectory, and business accounts are checked against the
    /// configured VAT whitelist endpoint.
    pub fn new(ledger_dir: &Path) -> Result<Self> {
        let config = Config::load(ledger_dir)?;

        let store = Arc::new(DuckDbAccountStore::new(&ledger_dir.join(LEDGER_DB_FILENAME))?);
        let registrar = Arc::new(MfRegistrarClient::new(
            &config.registrar_url,
            config.registrar_timeout_secs,
        )?);
        let notifier = Arc::new(OutboxNotifier::new(
            ledger_dir.join(OUTBOX_DIRNAME),
            config.sender_address.clone(),
        ));

        Ok(Self::with_components(config, store, registrar, notifier))
    }

    /// Create a context from explicit components
    pub fn with_components(
        config: Config,
        store: Arc<dyn AccountStore>,
        registrar: Arc<dyn TaxRegistrar>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let registry = Arc::new(RwLock::new(AccountRegistry::new()));

        let ledger_service = LedgerService::new(Arc::clone(&registry), registrar);
        let persistence_service = PersistenceService::new(store);
        let report_service = ReportService::new(Arc::clone(&registry), notifier);

        Self {
            config,
            registry,
            ledger_service,
            persistence_service,
            report_service,
        }
    }

    /// Replace the registry contents with the saved accounts
    pub fn load(&self) -> domain::result::Result<LoadResult> {
        let mut registry = self
            .registry
            .write()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))?;
        self.persistence_service.load(&mut registry)
    }

    /// Save every registered account, replacing what was saved before
    pub fn save(&self) -> domain::result::Result<SaveResult> {
        let registry = self
            .registry
            .read()
            .map_err(|e| Error::Other(format!("Lock poisoned: {}", e)))?;
        self.persistence_service.save(&registry)
    }
}
