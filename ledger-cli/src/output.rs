//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, ContentArrangement, Table};
use ledger_core::services::AccountSummary;
use rust_decimal::Decimal;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Amount with two decimal places
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

/// History entries as a signed, comma-separated list
pub fn format_history(history: &[Decimal]) -> String {
    if history.is_empty() {
        return "(none)".dimmed().to_string();
    }
    history
        .iter()
        .map(|e| if e.is_sign_positive() { format!("+{}", e) } else { e.to_string() })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Table of accounts, one row each
pub fn accounts_table(accounts: &[AccountSummary]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["Kind", "Identity", "Holder", "Balance", "Entries"]);
    for account in accounts {
        table.add_row(vec![
            Cell::new(account.kind),
            Cell::new(&account.identity),
            Cell::new(&account.name),
            Cell::new(format_amount(account.balance)).set_alignment(CellAlignment::Right),
            Cell::new(account.history.len()).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_amount_rounds_to_cents() {
        assert_eq!(format_amount(Decimal::from_str("12.5").unwrap()), "12.50");
        assert_eq!(format_amount(Decimal::from(-3)), "-3.00");
    }

    #[test]
    fn test_format_history_signs_entries() {
        colored::control::set_override(false);
        let history = [Decimal::from(100), Decimal::from(-1)];
        assert_eq!(format_history(&history), "+100, -1");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.0 KB");
    }
}
