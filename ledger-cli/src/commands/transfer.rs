//! Transfer command - incoming, outgoing and express transfers

use anyhow::Result;
use rust_decimal::Decimal;

use super::{finish, get_context, persist};
use crate::output;

pub fn run(identity: &str, kind: &str, amount: Decimal, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let result = ctx.ledger_service.transfer(identity, kind, amount);
    let applied = result.is_ok();

    finish("transfer", result, json, |transfer| {
        output::success(&format!(
            "Transfer of {} applied. Balance: {}",
            output::format_amount(transfer.amount),
            output::format_amount(transfer.balance)
        ));
    })?;

    if applied {
        persist(&ctx)?;
    }
    Ok(())
}
