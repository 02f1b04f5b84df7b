//! Logs command - inspect command outcomes recorded in logs.duckdb

use anyhow::Result;
use chrono::{Duration, TimeZone, Utc};
use clap::Subcommand;
use colored::Colorize;
use comfy_table::Cell;
use dialoguer::Confirm;
use serde_json::json;

use ledger_core::domain::AccountKind;
use ledger_core::services::{LogEntry, LogField, LogFilter, LoggingService};

use super::get_ledger_dir;
use crate::output;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recorded outcomes, newest first
    List {
        /// Maximum number of entries
        #[arg(short = 'n', long, default_value_t = 50)]
        limit: usize,
        /// Only entries of this command (e.g. transfer)
        #[arg(long)]
        command: Option<String>,
        /// Only entries about this account kind (personal or company)
        #[arg(long)]
        kind: Option<AccountKind>,
        /// Only failures of this kind (e.g. insufficient_funds)
        #[arg(long)]
        error_kind: Option<String>,
        /// Only failures
        #[arg(long)]
        errors: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete entries older than a number of days
    Clear {
        /// Age in days; newer entries are kept
        #[arg(long, default_value_t = 30)]
        older_than_days: u32,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Entry counts per command, account kind and error kind
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: LogsCommands) -> Result<()> {
    let ledger_dir = get_ledger_dir();
    std::fs::create_dir_all(&ledger_dir)?;
    let service = LoggingService::new(&ledger_dir, env!("CARGO_PKG_VERSION"))?;

    match command {
        LogsCommands::List {
            limit,
            command,
            kind,
            error_kind,
            errors,
            json,
        } => {
            let filter = LogFilter {
                command,
                account_kind: kind,
                errors_only: errors || error_kind.is_some(),
                error_kind,
            };
            list(&service, &filter, limit, json)
        }
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => clear(&service, older_than_days, force, json),
        LogsCommands::Stats { json } => stats(&service, json),
    }
}

fn list(service: &LoggingService, filter: &LogFilter, limit: usize, json: bool) -> Result<()> {
    let entries = service.search(filter, limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        output::info("No matching log entries.");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Time", "Command", "Kind", "Outcome"]);
    for entry in &entries {
        table.add_row(vec![
            Cell::new(format_timestamp(entry.timestamp)),
            Cell::new(entry.command.as_deref().unwrap_or(&entry.event)),
            Cell::new(entry.account_kind.as_deref().unwrap_or("-")),
            Cell::new(outcome(entry)),
        ]);
    }
    println!("{}", table);
    Ok(())
}

/// Error kind for failures, "ok" otherwise
fn outcome(entry: &LogEntry) -> String {
    match (&entry.error_kind, &entry.error_message) {
        (Some(kind), _) => kind.red().to_string(),
        (None, Some(message)) => message.red().to_string(),
        (None, None) => "ok".green().to_string(),
    }
}

/// Breakdown rows as a JSON object keyed by value
fn counts(rows: &[(String, u64)]) -> serde_json::Value {
    rows.iter()
        .map(|(name, n)| (name.clone(), json!(n)))
        .collect::<serde_json::Map<_, _>>()
        .into()
}

fn format_timestamp(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

fn clear(service: &LoggingService, older_than_days: u32, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete log entries older than {} days?", older_than_days))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    // A cutoff before the representable range keeps everything
    let cutoff_ms = Utc::now()
        .checked_sub_signed(Duration::days(i64::from(older_than_days)))
        .map_or(i64::MIN, |cutoff| cutoff.timestamp_millis());
    let deleted = service.delete_before(cutoff_ms)?;

    if json {
        println!("{}", json!({ "deleted": deleted }));
    } else {
        output::success(&format!("Deleted {} log entries", deleted));
    }
    Ok(())
}

fn stats(service: &LoggingService, json: bool) -> Result<()> {
    let total = service.count()?;
    let errors = service.count_errors()?;
    let by_command = service.breakdown(LogField::Command)?;
    let by_kind = service.breakdown(LogField::AccountKind)?;
    let by_error = service.breakdown(LogField::ErrorKind)?;
    let size_bytes = std::fs::metadata(service.db_path())
        .map(|m| m.len())
        .unwrap_or(0);

    if json {
        let body = json!({
            "total": total,
            "errors": errors,
            "byCommand": counts(&by_command),
            "byAccountKind": counts(&by_kind),
            "byErrorKind": counts(&by_error),
            "databaseSizeBytes": size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!(
        "{} entries, {} failed ({})",
        total,
        errors.to_string().red(),
        output::format_size(size_bytes)
    );
    for (title, rows) in [
        ("Command", &by_command),
        ("Account kind", &by_kind),
        ("Error kind", &by_error),
    ] {
        if rows.is_empty() {
            continue;
        }
        let mut table = output::create_table();
        table.set_header(vec![title, "Entries"]);
        for (name, n) in rows.iter() {
            table.add_row(vec![Cell::new(name), Cell::new(n)]);
        }
        println!("\n{}", table);
    }
    Ok(())
}
