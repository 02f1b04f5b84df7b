//! Delete command - close an account

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use super::{finish, get_context, persist};

pub fn run(identity: &str, force: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;

    // Confirm only when the account exists, so a missing one still reports NotFound
    if !force && !json {
        if let Ok(account) = ctx.ledger_service.get(identity) {
            let warning = format!(
                "This will delete the account of {} ({}).",
                account.name, account.identity
            );
            println!("\n{}", warning.yellow());
            if !Confirm::new()
                .with_prompt("Are you sure?")
                .default(false)
                .interact()?
            {
                println!("{}\n", "Cancelled".dimmed());
                return Ok(());
            }
        }
    }

    let result = ctx.ledger_service.delete(identity);
    let deleted = result.is_ok();

    finish("delete", result, json, |account| {
        println!("\n{} Account {} deleted\n", "✓".green(), account.identity);
    })?;

    if deleted {
        persist(&ctx)?;
    }
    Ok(())
}
