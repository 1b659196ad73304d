//! `taskboard list` and the menu's display choice.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};

use crate::board::Board;
use crate::commands::common::run_cycle;
use crate::fs::TaskStore;
use crate::models::{Priority, Stage, Task, TaskList};
use crate::utils::truncate;

const NAME_WIDTH: usize = 24;
const DESCRIPTION_WIDTH: usize = 44;

/// Print the sorted tasks of one stage, or of every stage.
pub fn execute(store: &TaskStore, stage: Option<Stage>, json: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    run_cycle(store, &mut out, |board, out| {
        let sorted = sorted_stages(board, stage);
        if json {
            write_json(out, &sorted)
        } else {
            for (stage, tasks) in &sorted {
                render_stage(out, *stage, tasks)?;
            }
            Ok(())
        }
    })
}

/// Sorted lists for `stage`, or for all stages when `None`
pub fn sorted_stages(board: &Board, stage: Option<Stage>) -> Vec<(Stage, TaskList)> {
    match stage {
        Some(stage) => vec![(stage, board.sorted(stage))],
        None => board.sorted_all(),
    }
}

/// Render one stage as a table under its heading
pub fn render_stage<W: Write>(out: &mut W, stage: Stage, tasks: &TaskList) -> Result<()> {
    writeln!(out, "{}", format!("{}:", stage.display_name()).bold())?;

    if tasks.is_empty() {
        writeln!(out, "  {} No tasks", "ℹ".blue())?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "  {:w1$} {:w2$} {}",
        "NAME".bold(),
        "DESCRIPTION".bold(),
        "PRIORITY".bold(),
        w1 = NAME_WIDTH,
        w2 = DESCRIPTION_WIDTH,
    )?;
    writeln!(out, "  {}", "─".repeat(NAME_WIDTH + DESCRIPTION_WIDTH + 10))?;

    for task in tasks {
        writeln!(
            out,
            "  {:w1$} {:w2$} {}",
            truncate(&task.name, NAME_WIDTH).cyan(),
            truncate(&task.description, DESCRIPTION_WIDTH),
            priority_colored(task),
            w1 = NAME_WIDTH,
            w2 = DESCRIPTION_WIDTH,
        )?;
    }
    writeln!(out)?;

    Ok(())
}

fn priority_colored(task: &Task) -> ColoredString {
    let label = task.priority_label();
    match Priority::from_code(task.priority) {
        Ok(Priority::High) => label.red(),
        Ok(Priority::Medium) => label.yellow(),
        Ok(Priority::Low) => label.normal(),
        Err(_) => label.dimmed(),
    }
}

fn write_json<W: Write>(out: &mut W, sorted: &[(Stage, TaskList)]) -> Result<()> {
    let value = sorted
        .iter()
        .map(|(stage, tasks)| serde_json::to_value(tasks).map(|v| (stage.key().to_string(), v)))
        .collect::<Result<serde_json::Map<String, serde_json::Value>, _>>()
        .context("Failed to serialize tasks")?;

    serde_json::to_writer_pretty(&mut *out, &value).context("Failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}
