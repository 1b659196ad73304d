//! `taskboard move <from> <to> <name>`

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;

use crate::commands::common::run_cycle;
use crate::fs::TaskStore;
use crate::models::Stage;

pub fn execute(store: &TaskStore, from: Stage, to: Stage, name: String) -> Result<()> {
    let mut out = io::stdout().lock();
    run_cycle(store, &mut out, |board, out| {
        let moved = board.move_task(from, to, &name)?;
        writeln!(
            out,
            "{} Moved '{}': {} → {}",
            "✓".green(),
            moved.name.cyan(),
            from,
            to
        )?;
        Ok(())
    })
}
