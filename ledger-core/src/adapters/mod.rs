//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB and in-memory stores for the AccountStore port
//! - VAT whitelist HTTP client for the TaxRegistrar port
//! - Filesystem outbox for the Notifier port

pub mod duckdb;
pub mod memory;
pub mod outbox;
pub mod registrar;

#[cfg(test)]
pub mod registrar_mock;
