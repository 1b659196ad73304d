//! `taskboard delete <stage> <name>`

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;

use crate::commands::common::run_cycle;
use crate::fs::TaskStore;
use crate::models::Stage;

pub fn execute(store: &TaskStore, stage: Stage, name: String) -> Result<()> {
    let mut out = io::stdout().lock();
    run_cycle(store, &mut out, |board, out| {
        let removed = board.delete(stage, &name)?;
        writeln!(
            out,
            "{} Deleted '{}' from {}",
            "✓".green(),
            removed.name.cyan(),
            stage
        )?;
        Ok(())
    })
}
