//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod ledger;
pub mod logging;
pub mod migration;
mod persistence;
mod report;

pub use ledger::{AccountSummary, AccountUpdate, LedgerService, LoanDecision, TransferResult};
pub use logging::{LogEntry, LogEvent, LogField, LogFilter, LoggingService};
pub use migration::{MigrationResult, MigrationService};
pub use persistence::{LoadResult, PersistenceService, SaveResult};
pub use report::ReportService;
