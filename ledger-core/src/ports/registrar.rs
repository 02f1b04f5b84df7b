//! Tax registrar port
//!
//! Business accounts are only opened for companies the registrar reports as
//! active taxpayers.

use chrono::NaiveDate;

use crate::domain::result::Result;

/// External registry of company tax identifiers
pub trait TaxRegistrar: Send + Sync {
    /// Registrar name (e.g., "mf-whitelist")
    fn name(&self) -> &str;

    /// Whether the company with `nip` is an active taxpayer on `date`
    ///
    /// # Arguments
    /// * `nip` - Raw 10-digit tax id
    /// * `date` - Day the status is checked for
    fn is_active(&self, nip: &str, date: NaiveDate) -> Result<bool>;
}
