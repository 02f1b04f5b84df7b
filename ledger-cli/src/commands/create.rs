//! Create command - open a personal account

use anyhow::Result;
use colored::Colorize;

use super::{finish, get_context, persist};
use crate::output;

pub fn run(
    first_name: &str,
    last_name: &str,
    pesel: Option<&str>,
    promo_code: Option<&str>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;
    let result = ctx
        .ledger_service
        .create_personal(first_name, last_name, pesel, promo_code);
    let created = result.is_ok();

    finish("create", result, json, |account| {
        output::success(&format!("Account created for {}", account.name));
        if !account.identity_is_valid() {
            output::warning("PESEL was missing or malformed; stored as Invalid");
        }
        if !account.balance.is_zero() {
            println!("  Promotional bonus: {}", output::format_amount(account.balance).green());
        }
    })?;

    if created {
        persist(&ctx)?;
    }
    Ok(())
}
