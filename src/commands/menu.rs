//! Interactive menu.
//!
//! Every iteration is a full store cycle: load all stages, run one choice,
//! save all stages. Engine errors (unknown task, bad field) are printed and
//! the loop continues. The loop ends on the exit choice or end of input.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::board::Board;
use crate::commands::common::run_cycle;
use crate::commands::list::render_stage;
use crate::fs::TaskStore;
use crate::models::{Priority, Stage};
use crate::validation::validate_field;

/// Whether the menu loop should keep going after an iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Run the menu on stdin/stdout
pub fn execute(store: &TaskStore) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    run(store, &mut input, &mut out)
}

/// Run the menu until exit or end of input
pub fn run<R: BufRead, W: Write>(store: &TaskStore, input: &mut R, out: &mut W) -> Result<()> {
    loop {
        let flow = run_cycle(store, out, |board, out| iteration(board, input, out))?;
        if flow == Flow::Exit {
            return Ok(());
        }
    }
}

fn iteration<R: BufRead, W: Write>(board: &mut Board, input: &mut R, out: &mut W) -> Result<Flow> {
    writeln!(out)?;
    writeln!(out, "{}", "--- Task Management System ---".bold())?;
    writeln!(out, "1 - Display task list")?;
    writeln!(out, "2 - Add a task")?;
    writeln!(out, "3 - Delete a task")?;
    writeln!(out, "4 - Move a task")?;
    writeln!(out, "5 - Exit")?;

    let Some(choice) = prompt(input, out, "Your choice: ")? else {
        writeln!(out)?;
        return Ok(Flow::Exit);
    };

    match choice.as_str() {
        "1" => {
            for (stage, tasks) in board.sorted_all() {
                render_stage(out, stage, &tasks)?;
            }
            Ok(Flow::Continue)
        }
        "2" => add_task(board, input, out),
        "3" => delete_task(board, input, out),
        "4" => move_task(board, input, out),
        "5" => {
            writeln!(out, "Exiting the program.")?;
            Ok(Flow::Exit)
        }
        _ => {
            writeln!(out, "Invalid choice. Please try again.")?;
            Ok(Flow::Continue)
        }
    }
}

fn add_task<R: BufRead, W: Write>(board: &mut Board, input: &mut R, out: &mut W) -> Result<Flow> {
    let delimiter = board.delimiter();

    let Some(name) = prompt_until(input, out, "Enter task name: ", |s| {
        validate_field("name", s, delimiter).map(|_| s.to_string())
    })?
    else {
        return Ok(Flow::Exit);
    };

    let Some(description) = prompt_until(input, out, "Enter task description: ", |s| {
        validate_field("description", s, delimiter).map(|_| s.to_string())
    })?
    else {
        return Ok(Flow::Exit);
    };

    let Some(priority) = prompt_until(
        input,
        out,
        "Enter priority (1 - High, 2 - Medium, 3 - Low): ",
        |s| Priority::from_code(parse_choice(s)),
    )?
    else {
        return Ok(Flow::Exit);
    };

    let Some(stage) = prompt_until(
        input,
        out,
        "Enter status (0 = not started, 1 = in progress, 2 = completed): ",
        |s| Stage::from_code(parse_choice(s)),
    )?
    else {
        return Ok(Flow::Exit);
    };

    match board.add(name, description, priority.code(), stage.code()) {
        Ok(task) => writeln!(
            out,
            "{} Task '{}' added to {}.",
            "✓".green(),
            task.name,
            stage
        )?,
        Err(e) => writeln!(out, "{} {e}", "✗".red())?,
    }
    Ok(Flow::Continue)
}

fn delete_task<R: BufRead, W: Write>(
    board: &mut Board,
    input: &mut R,
    out: &mut W,
) -> Result<Flow> {
    writeln!(out, "Which list to delete from?")?;
    writeln!(out, "1 - To do\n2 - In progress\n3 - Done")?;
    let Some(choice) = prompt(input, out, "")? else {
        return Ok(Flow::Exit);
    };

    let stage = match choice.as_str() {
        "1" => Stage::NotStarted,
        "2" => Stage::InProgress,
        "3" => Stage::Completed,
        _ => {
            writeln!(out, "Invalid list choice.")?;
            return Ok(Flow::Continue);
        }
    };

    let Some(name) = prompt(input, out, "Enter the name of the task to delete: ")? else {
        return Ok(Flow::Exit);
    };

    match board.delete(stage, &name) {
        Ok(removed) => writeln!(
            out,
            "{} Task '{}' deleted successfully.",
            "✓".green(),
            removed.name
        )?,
        Err(e) => writeln!(out, "{} {e}", "✗".red())?,
    }
    Ok(Flow::Continue)
}

fn move_task<R: BufRead, W: Write>(board: &mut Board, input: &mut R, out: &mut W) -> Result<Flow> {
    writeln!(out, "Move from which list?")?;
    writeln!(out, "1 - To do to In progress")?;
    writeln!(out, "2 - In progress to Done")?;
    writeln!(out, "3 - Done to In progress")?;
    let Some(choice) = prompt(input, out, "")? else {
        return Ok(Flow::Exit);
    };

    let (from, to) = match choice.as_str() {
        "1" => (Stage::NotStarted, Stage::InProgress),
        "2" => (Stage::InProgress, Stage::Completed),
        "3" => (Stage::Completed, Stage::InProgress),
        _ => {
            writeln!(out, "Invalid move choice.")?;
            return Ok(Flow::Continue);
        }
    };

    let Some(name) = prompt(input, out, "Enter the name of the task to move: ")? else {
        return Ok(Flow::Exit);
    };

    match board.move_task(from, to, &name) {
        Ok(_) => writeln!(out, "{} Task moved successfully!", "✓".green())?,
        Err(e) => writeln!(out, "{} {e}", "✗".red())?,
    }
    Ok(Flow::Continue)
}

/// Non-numeric answers map to -1, which no range check accepts.
fn parse_choice(s: &str) -> i32 {
    s.parse::<i32>().unwrap_or(-1)
}

/// Print `label` and read one trimmed line. `None` at end of input.
///
/// Input that is not valid UTF-8 is decoded lossily, so it reaches the
/// usual validation instead of ending the session.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = Vec::new();
    let read = input
        .read_until(b'\n', &mut line)
        .context("Failed to read menu input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
}

/// Prompt until `parse` accepts the answer. `None` at end of input.
fn prompt_until<R, W, T, E, F>(input: &mut R, out: &mut W, label: &str, parse: F) -> Result<Option<T>>
where
    R: BufRead,
    W: Write,
    E: std::fmt::Display,
    F: Fn(&str) -> Result<T, E>,
{
    loop {
        let Some(answer) = prompt(input, out, label)? else {
            return Ok(None);
        };
        match parse(&answer) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => writeln!(out, "{} {e}", "✗".red())?,
        }
    }
}
