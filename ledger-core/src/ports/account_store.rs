//! Account store port - durable record storage

use crate::domain::result::Result;
use crate::domain::AccountRecord;

/// Durable storage for account records.
///
/// The store only knows whole snapshots: `clear` followed by `insert_many`
/// replaces its content, `fetch_all` reads it back. The two writes are not
/// transactional with each other.
pub trait AccountStore: Send + Sync {
    /// Store name for diagnostics (e.g., "duckdb", "memory")
    fn name(&self) -> &str;

    /// Delete every stored record
    fn clear(&self) -> Result<()>;

    /// Write records in order
    ///
    /// # Arguments
    /// * `records` - Records to append; never called with an empty slice by
    ///   the persistence service
    fn insert_many(&self, records: &[AccountRecord]) -> Result<()>;

    /// Read every stored record in write order
    fn fetch_all(&self) -> Result<Vec<AccountRecord>>;
}
