//! CLI command implementations

pub mod company;
pub mod config;
pub mod create;
pub mod delete;
pub mod list;
pub mod loan;
pub mod logs;
pub mod report;
pub mod show;
pub mod store;
pub mod transfer;
pub mod update;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use ledger_core::domain::result::Result as LedgerResult;
use ledger_core::services::{
    AccountSummary, LoadResult, LoanDecision, LogEvent, LoggingService, SaveResult,
    TransferResult,
};
use ledger_core::{AccountKind, HistoryReport, LedgerContext, OperationResult};
use serde::Serialize;

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let ledger_dir = get_ledger_dir();
    std::fs::create_dir_all(&ledger_dir).ok()?;
    LoggingService::new(&ledger_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the ledger directory from environment or default
pub fn get_ledger_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LEDGER_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ledger")
    }
}

/// Log an infrastructure failure (no account data involved)
fn log_failure(event: &str, error: &anyhow::Error) {
    if let Some(logger) = get_logger() {
        let details = format!("{:#}", error);
        let _ = logger.log_error(event, &error.to_string(), Some(&details));
    }
}

/// Open the ledger with an empty registry
pub fn open_context() -> Result<LedgerContext> {
    let ledger_dir = get_ledger_dir();

    std::fs::create_dir_all(&ledger_dir)
        .with_context(|| format!("Failed to create ledger directory: {:?}", ledger_dir))?;

    LedgerContext::new(&ledger_dir)
        .context("Failed to initialize ledger context")
        .inspect_err(|e| log_failure("context_failed", e))
}

/// Open the ledger and load the saved accounts into the registry
pub fn get_context() -> Result<LedgerContext> {
    let ctx = open_context()?;
    ctx.load()
        .context("Failed to load saved accounts")
        .inspect_err(|e| log_failure("load_failed", e))?;
    Ok(ctx)
}

/// Command results, with the account kind they touched when there is one
pub trait Outcome: Serialize {
    fn account_kind(&self) -> Option<AccountKind> {
        None
    }
}

impl Outcome for AccountSummary {
    fn account_kind(&self) -> Option<AccountKind> {
        Some(self.kind)
    }
}

impl Outcome for TransferResult {
    fn account_kind(&self) -> Option<AccountKind> {
        Some(self.account_kind)
    }
}

impl Outcome for LoanDecision {
    fn account_kind(&self) -> Option<AccountKind> {
        Some(self.account_kind)
    }
}

impl Outcome for Vec<AccountSummary> {}
impl Outcome for usize {}
impl Outcome for HistoryReport {}
impl Outcome for SaveResult {}
impl Outcome for LoadResult {}

/// Report a command outcome and turn a failure into the CLI error.
///
/// With `json` the outcome is printed as an `OperationResult`; otherwise
/// `render` prints a successful value. Failures are logged by kind only.
pub fn finish<T: Outcome>(
    command: &str,
    result: LedgerResult<T>,
    json: bool,
    render: impl FnOnce(&T),
) -> Result<()> {
    let logger = get_logger();

    match result {
        Ok(value) => {
            if let Some(l) = &logger {
                let _ = match value.account_kind() {
                    Some(kind) => l.log(
                        LogEvent::new("command_executed")
                            .with_command(command)
                            .with_account_kind(kind),
                    ),
                    None => l.log_command(command),
                };
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&OperationResult::ok(&value))?);
            } else {
                render(&value);
            }
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("command_failed")
                    .with_command(command)
                    .with_domain_error(&e),
            );
            let message = format!("{} [{}]", e, e.kind());
            if json {
                let outcome = OperationResult::<T>::from(LedgerResult::<T>::Err(e));
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
            Err(anyhow!(message))
        }
    }
}

/// Save the registry after a command changed it
pub fn persist(ctx: &LedgerContext) -> Result<()> {
    ctx.save()
        .context("Failed to save accounts")
        .inspect_err(|e| log_failure("save_failed", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_core::TransferKind;
    use rust_decimal::Decimal;

    #[test]
    fn test_outcomes_name_the_account_kind() {
        let transfer = TransferResult {
            account_kind: AccountKind::Company,
            kind: TransferKind::Express,
            amount: Decimal::TEN,
            balance: Decimal::ZERO,
        };
        assert_eq!(transfer.account_kind(), Some(AccountKind::Company));
        assert_eq!(3usize.account_kind(), None);
        assert_eq!(Vec::<AccountSummary>::new().account_kind(), None);
    }
}
