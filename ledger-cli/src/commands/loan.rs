//! Loan command - request a loan under the account's rule

use anyhow::Result;
use rust_decimal::Decimal;

use super::{finish, get_context, persist};
use crate::output;

pub fn run(identity: &str, amount: Decimal, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let result = ctx.ledger_service.loan(identity, amount);
    let granted = matches!(result, Ok(ref decision) if decision.granted);

    finish("loan", result, json, |decision| {
        if decision.granted {
            output::success(&format!(
                "Loan of {} granted. Balance: {}",
                output::format_amount(decision.amount),
                output::format_amount(decision.balance)
            ));
        } else {
            output::warning(&format!(
                "Loan of {} denied",
                output::format_amount(decision.amount)
            ));
        }
    })?;

    if granted {
        persist(&ctx)?;
    }
    Ok(())
}
