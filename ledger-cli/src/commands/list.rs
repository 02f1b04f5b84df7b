//! List and count commands

use anyhow::Result;
use colored::Colorize;

use super::{finish, get_context};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;

    finish("list", ctx.ledger_service.list(), json, |accounts| {
        if accounts.is_empty() {
            println!("{}", "No accounts yet. Use 'ledger create' to open one.".dimmed());
            return;
        }
        println!("{}", output::accounts_table(accounts));
    })
}

pub fn run_count(json: bool) -> Result<()> {
    let ctx = get_context()?;

    finish("count", ctx.ledger_service.count(), json, |count| {
        println!("{} account(s)", count);
    })
}
