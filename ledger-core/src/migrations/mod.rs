//! Schema migrations for the account store (`ledger.duckdb`)
//!
//! SQL files are embedded with `include_str!` and applied by
//! `MigrationService` in the order listed below.

/// Account store migrations as (file name, sql). Keep the list sorted;
/// new files get the next NNN_ prefix.
pub const MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    ("001_initial_schema.sql", include_str!("001_initial_schema.sql")),
    ("002_account_kind.sql", include_str!("002_account_kind.sql")),
];
