//! Shared plumbing for commands: opening the store and running one
//! load → operate → save cycle.

use std::env;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::board::Board;
use crate::fs::TaskStore;

/// Open the store in `dir`, or in the current directory.
pub fn open_store(dir: Option<PathBuf>) -> Result<TaskStore> {
    let data_dir = match dir {
        Some(dir) => dir,
        None => env::current_dir().context("Failed to get current directory")?,
    };

    if !data_dir.is_dir() {
        anyhow::bail!("Data directory not found: {}", data_dir.display());
    }

    TaskStore::open(&data_dir)
        .with_context(|| format!("Failed to open task store in {}", data_dir.display()))
}

/// Load every stage, run `op`, then save every stage.
///
/// Saving happens whether or not `op` succeeded. Load and save problems are
/// reported on `out` and never abort the cycle.
pub fn run_cycle<W, T, F>(store: &TaskStore, out: &mut W, op: F) -> Result<T>
where
    W: Write,
    F: FnOnce(&mut Board, &mut W) -> Result<T>,
{
    let (mut board, notices) = store.load_all();
    for notice in &notices {
        writeln!(out, "{} {notice}", "⚠".yellow())?;
    }

    let result = op(&mut board, out);

    for failure in store.save_all(&board) {
        writeln!(out, "{} {failure}", "✗".red())?;
    }

    result
}
