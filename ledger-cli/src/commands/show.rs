//! Show command - details of one account

use anyhow::Result;
use colored::Colorize;

use super::{finish, get_context};
use crate::output;

pub fn run(identity: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;

    finish("show", ctx.ledger_service.get(identity), json, |account| {
        println!("{}", account.name.bold());
        println!();

        let mut table = output::create_table();
        table.add_row(vec!["Kind", account.kind.as_str()]);
        table.add_row(vec!["Identity", &account.identity]);
        table.add_row(vec!["Balance", &output::format_amount(account.balance)]);
        table.add_row(vec!["History", &output::format_history(&account.history)]);
        println!("{}", table);
    })
}
