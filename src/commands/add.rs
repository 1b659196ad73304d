//! `taskboard add <name> <description>`

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;

use crate::commands::common::run_cycle;
use crate::fs::TaskStore;
use crate::models::{Priority, Stage};

pub fn execute(
    store: &TaskStore,
    name: String,
    description: String,
    priority: Priority,
    stage: Stage,
) -> Result<()> {
    let mut out = io::stdout().lock();
    run_cycle(store, &mut out, |board, out| {
        let task = board.add(name, description, priority.code(), stage.code())?;
        writeln!(
            out,
            "{} Added '{}' to {} (priority: {})",
            "✓".green(),
            task.name.cyan(),
            stage,
            task.priority_label()
        )?;
        Ok(())
    })
}
