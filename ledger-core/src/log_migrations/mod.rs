//! Schema migrations for the event log (`logs.duckdb`)
//!
//! Logs live in their own database file, so they carry their own
//! migration set and their own sys_migrations table.

/// Log database migrations as (file name, sql)
pub const LOG_MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    ("001_initial_schema.sql", include_str!("001_initial_schema.sql")),
];
