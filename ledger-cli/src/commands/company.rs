//! Company command - open a business account
//!
//! A well-formed NIP is checked against the VAT whitelist before the
//! account is opened.

use anyhow::Result;

use super::{finish, get_context, persist};
use crate::output;

pub fn run(company_name: &str, nip: Option<&str>, json: bool) -> Result<()> {
    let ctx = get_context()?;

    if !json {
        if let Some(nip) = nip {
            output::info(&format!(
                "Checking NIP {} with {} ({})...",
                nip,
                ctx.ledger_service.registrar_name(),
                ctx.config.registrar_url
            ));
        }
    }

    let result = ctx.ledger_service.create_company(company_name, nip);
    let created = result.is_ok();

    finish("company", result, json, |account| {
        output::success(&format!("Business account created for {}", account.name));
        if !account.identity_is_valid() {
            output::warning("NIP was missing or malformed; stored as Invalid");
        }
    })?;

    if created {
        persist(&ctx)?;
    }
    Ok(())
}
