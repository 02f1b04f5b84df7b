//! Core domain entities
//!
//! All business entities are defined here. These are plain data structures
//! with their invariants - no I/O. The registrar is reached only through
//! the `TaxRegistrar` port.

mod account;
mod company;
pub mod identity;
mod ledger;
mod ledger_account;
mod record;
mod registry;
mod report;
pub mod result;

pub use account::{Account, PERSONAL_EXPRESS_FEE, PROMO_PREFIX};
pub use company::{CompanyAccount, COMPANY_EXPRESS_FEE, LOAN_QUALIFYING_MARKER};
pub use identity::Identity;
pub use ledger::{Ledger, Transfers};
pub use ledger_account::{AccountKind, LedgerAccount, TransferKind};
pub use record::AccountRecord;
pub use registry::AccountRegistry;
pub use report::HistoryReport;
