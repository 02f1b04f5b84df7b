//! Update command - change holder names

use anyhow::Result;
use ledger_core::services::AccountUpdate;

use super::{finish, get_context, persist};
use crate::output;

pub fn run(identity: &str, update: AccountUpdate, json: bool) -> Result<()> {
    if update.first_name.is_none() && update.last_name.is_none() && update.company_name.is_none() {
        anyhow::bail!("Nothing to update. Pass --first-name, --last-name or --company-name.");
    }

    let ctx = get_context()?;
    let result = ctx.ledger_service.update(identity, update);
    let updated = result.is_ok();

    finish("update", result, json, |account| {
        output::success(&format!("Account {} updated: {}", account.identity, account.name));
    })?;

    if updated {
        persist(&ctx)?;
    }
    Ok(())
}
