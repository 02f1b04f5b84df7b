//! Save and load commands - explicit persistence
//!
//! Every data command already loads before it runs and saves after a
//! change. `load` reads the store once and reports what it holds. `save`
//! rewrites the store from what loads cleanly, which drops records whose
//! identity repeats an earlier one.

use anyhow::Result;
use ledger_core::domain::result::Result as LedgerResult;
use serde::Serialize;

use super::{finish, open_context, Outcome};
use crate::output;

/// Result of rewriting the store
#[derive(Debug, Serialize)]
pub struct Compaction {
    pub store: String,
    pub saved: usize,
    /// Stored records that were not written back
    pub dropped: usize,
}

impl Outcome for Compaction {}

pub fn run_save(json: bool) -> Result<()> {
    let ctx = open_context()?;

    let result: LedgerResult<Compaction> = ctx.load().and_then(|loaded| {
        let saved = ctx.save()?;
        Ok(Compaction {
            store: saved.store,
            saved: saved.saved,
            dropped: loaded.skipped,
        })
    });

    finish("save", result, json, |compaction| {
        output::success(&format!(
            "Saved {} account(s) to {}",
            compaction.saved, compaction.store
        ));
        if compaction.dropped > 0 {
            output::warning(&format!(
                "Dropped {} record(s) with a repeated identity",
                compaction.dropped
            ));
        }
    })
}

pub fn run_load(json: bool) -> Result<()> {
    let ctx = open_context()?;

    finish("load", ctx.load(), json, |result| {
        output::success(&format!("Loaded {} account(s) from {}", result.loaded, result.store));
        if result.skipped > 0 {
            output::warning(&format!(
                "Skipped {} record(s) with an identity that was already loaded",
                result.skipped
            ));
        }
    })
}
