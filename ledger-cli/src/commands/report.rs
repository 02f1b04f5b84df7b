//! Report command - send an account's transfer history

use anyhow::Result;
use colored::Colorize;

use ledger_core::OUTBOX_DIRNAME;

use super::{finish, get_context, get_ledger_dir};
use crate::output;

pub fn run(identity: &str, address: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let result = ctx.report_service.send_history(identity, address);

    finish("report", result, json, |report| {
        output::success(&format!(
            "History sent to {} via {}",
            address,
            ctx.report_service.notifier_name()
        ));
        println!("  {}", report.subject.bold());
        println!("  {}", report.body);
        let outbox = get_ledger_dir().join(OUTBOX_DIRNAME);
        println!("{}", format!("  Outbox: {}", outbox.display()).dimmed());
    })
}
