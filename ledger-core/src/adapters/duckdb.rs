//! DuckDB account store

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use duckdb::{params, Connection};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::result::{Error as DomainError, Result as DomainResult};
use crate::domain::{AccountKind, AccountRecord};
use crate::migrations::MIGRATIONS;
use crate::ports::AccountStore;
use crate::services::MigrationService;

/// Maximum number of retries when database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400, 800ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
pub fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows error messages
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS error messages
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
}

/// Raw column values of one sys_accounts row
type RawRow = (
    Option<String>,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    String,
    String,
);

/// Durable account store backed by a DuckDB file
pub struct DuckDbAccountStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl DuckDbAccountStore {
    /// Open (or create) the store at `db_path` and bring its schema up to date.
    ///
    /// Opening retries with exponential backoff while another process holds
    /// the file lock.
    pub fn new(db_path: &Path) -> Result<Self> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            match Self::try_open_connection(db_path) {
                Ok(conn) => {
                    let store = Self {
                        conn: Mutex::new(conn),
                        db_path: Some(db_path.to_path_buf()),
                    };
                    store.ensure_schema()?;
                    return Ok(store);
                }
                Err(e) => {
                    let err_msg = e.to_string();
                    if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                        let delay =
                            Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                        eprintln!(
                            "[ledger] Database busy, retrying in {}ms (attempt {}/{}): {}",
                            delay.as_millis(),
                            attempt + 1,
                            MAX_RETRIES,
                            err_msg
                        );
                        thread::sleep(delay);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow!("Failed to open database after {} retries", MAX_RETRIES)))
    }

    /// Volatile store for tests and embedding
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
            db_path: None,
        };
        store.ensure_schema()?;
        Ok(store)
    }

    fn try_open_connection(db_path: &Path) -> Result<Connection> {
        // Extension autoloading stays off; JSON is linked statically
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_with_flags(db_path, config)?;
        Ok(conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))
    }

    /// Run pending migrations
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.lock()?;
        MigrationService::new(&conn, MIGRATIONS).run_pending()?;
        Ok(())
    }

    /// Path of the database file, `None` for in-memory stores
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    // === Account records ===

    pub fn delete_all_records(&self) -> Result<usize> {
        let conn = self.lock()?;
        let deleted = conn.execute("DELETE FROM sys_accounts", [])?;
        Ok(deleted)
    }

    /// Append records after the current last position, in one transaction
    pub fn insert_records(&self, records: &[AccountRecord]) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let start: i64 = tx.query_row(
            "SELECT COALESCE(MAX(seq) + 1, 0) FROM sys_accounts",
            [],
            |row| row.get(0),
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO sys_accounts (record_id, seq, kind, account_identity, first_name,
                                           last_name, company_name, balance, history)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )?;

            for (offset, record) in records.iter().enumerate() {
                let history: Vec<String> = record.history.iter().map(|d| d.to_string()).collect();
                stmt.execute(params![
                    Uuid::new_v4().to_string(),
                    start + offset as i64,
                    record.kind.map(|k| k.as_str()),
                    record.identity,
                    record.first_name,
                    record.last_name,
                    record.company_name,
                    record.balance.to_string(),
                    serde_json::to_string(&history)?,
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    pub fn get_records(&self) -> Result<Vec<AccountRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT kind, account_identity, first_name, last_name, company_name, balance, history
             FROM sys_accounts
             ORDER BY seq",
        )?;

        let rows = stmt
            .query_map([], |row| -> duckdb::Result<RawRow> {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                ))
            })?
            .collect::<duckdb::Result<Vec<RawRow>>>()?;

        rows.into_iter().map(Self::row_to_record).collect()
    }

    pub fn count_records(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM sys_accounts", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn row_to_record(row: RawRow) -> Result<AccountRecord> {
        let (kind, identity, first_name, last_name, company_name, balance, history) = row;

        let kind = kind
            .map(|k| k.parse::<AccountKind>())
            .transpose()
            .map_err(|e| anyhow!("{}", e))?;
        let balance = Decimal::from_str_exact(&balance)
            .with_context(|| format!("Invalid stored balance for {}", identity))?;
        let history = serde_json::from_str::<Vec<String>>(&history)
            .with_context(|| format!("Invalid stored history for {}", identity))?
            .iter()
            .map(|entry| Decimal::from_str_exact(entry))
            .collect::<std::result::Result<Vec<_>, _>>()
            .with_context(|| format!("Invalid stored history entry for {}", identity))?;

        Ok(AccountRecord {
            kind,
            identity,
            first_name,
            last_name,
            company_name,
            balance,
            history,
        })
    }
}

impl AccountStore for DuckDbAccountStore {
    fn name(&self) -> &str {
        "duckdb"
    }

    fn clear(&self) -> DomainResult<()> {
        self.delete_all_records()
            .map(|_| ())
            .map_err(|e| DomainError::database(e.to_string()))
    }

    fn insert_many(&self, records: &[AccountRecord]) -> DomainResult<()> {
        self.insert_records(records)
            .map_err(|e| DomainError::database(e.to_string()))
    }

    fn fetch_all(&self) -> DomainResult<Vec<AccountRecord>> {
        self.get_records()
            .map_err(|e| DomainError::database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn record(identity: &str, kind: Option<AccountKind>) -> AccountRecord {
        AccountRecord {
            kind,
            identity: identity.to_string(),
            first_name: Some("Jan".to_string()),
            last_name: Some("Nowak".to_string()),
            company_name: None,
            balance: dec!(12.34),
            history: vec![dec!(12.34), dec!(-0.01), dec!(0.01)],
        }
    }

    #[test]
    fn test_insert_and_fetch_preserves_order_and_values() {
        let store = DuckDbAccountStore::open_in_memory().unwrap();
        let records = vec![
            record("22222222222", Some(AccountKind::Personal)),
            record("11111111111", None),
        ];
        store.insert_many(&records).unwrap();

        let fetched = store.fetch_all().unwrap();
        assert_eq!(fetched, records);
    }

    #[test]
    fn test_append_continues_positions() {
        let store = DuckDbAccountStore::open_in_memory().unwrap();
        store.insert_many(&[record("1", None)]).unwrap();
        store.insert_many(&[record("2", None)]).unwrap();

        let ids: Vec<_> = store.fetch_all().unwrap().into_iter().map(|r| r.identity).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_clear_empties_store() {
        let store = DuckDbAccountStore::open_in_memory().unwrap();
        store.insert_many(&[record("1", None), record("1", None)]).unwrap();
        assert_eq!(store.count_records().unwrap(), 2);

        store.clear().unwrap();
        assert_eq!(store.count_records().unwrap(), 0);
        assert!(store.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("ledger.duckdb");

        {
            let store = DuckDbAccountStore::new(&db_path).unwrap();
            store.insert_many(&[record("89092909825", Some(AccountKind::Personal))]).unwrap();
        }

        let store = DuckDbAccountStore::new(&db_path).unwrap();
        assert_eq!(store.db_path(), Some(db_path.as_path()));
        let fetched = store.fetch_all().unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].balance, dec!(12.34));
    }

    #[test]
    fn test_corrupt_balance_is_reported() {
        let store = DuckDbAccountStore::open_in_memory().unwrap();
        {
            let conn = store.lock().unwrap();
            conn.execute(
                "INSERT INTO sys_accounts (record_id, seq, account_identity, balance, history)
                 VALUES ('x', 0, '1', 'lots', '[]')",
                [],
            )
            .unwrap();
        }
        let err = store.fetch_all().unwrap_err();
        assert!(matches!(err, DomainError::Database(_)));
    }

    #[test]
    fn test_retryable_error_detection() {
        assert!(is_retryable_error("Database is locked"));
        assert!(is_retryable_error(
            "The process cannot access the file because it is being used by another process"
        ));
        assert!(!is_retryable_error("Catalog Error: Table does not exist"));
    }
}
