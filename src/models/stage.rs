use serde::{Deserialize, Serialize};

use crate::error::TaskError;

/// The three stages a task moves through. Each stage has its own store file
/// and its own in-memory list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Not started yet (status 0)
    NotStarted,
    /// Being worked on (status 1)
    InProgress,
    /// Finished (status 2)
    Completed,
}

impl Stage {
    /// Numeric status code written to the store file
    pub fn code(&self) -> i32 {
        match self {
            Stage::NotStarted => 0,
            Stage::InProgress => 1,
            Stage::Completed => 2,
        }
    }

    /// Map a status code back to its stage
    pub fn from_code(code: i32) -> Result<Self, TaskError> {
        match code {
            0 => Ok(Stage::NotStarted),
            1 => Ok(Stage::InProgress),
            2 => Ok(Stage::Completed),
            other => Err(TaskError::InvalidStatus(other)),
        }
    }

    /// Default store file name for this stage
    pub fn default_filename(&self) -> &'static str {
        match self {
            Stage::NotStarted => "todo.txt",
            Stage::InProgress => "in_progress.txt",
            Stage::Completed => "done.txt",
        }
    }

    /// Stable machine-readable name, as used in JSON output
    pub fn key(&self) -> &'static str {
        match self {
            Stage::NotStarted => "not-started",
            Stage::InProgress => "in-progress",
            Stage::Completed => "completed",
        }
    }

    /// Heading used when listing the stage
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::NotStarted => "To do",
            Stage::InProgress => "In progress",
            Stage::Completed => "Done",
        }
    }

    /// All stages in display order
    pub fn all() -> &'static [Stage] {
        &[Stage::NotStarted, Stage::InProgress, Stage::Completed]
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Stage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "todo" | "to-do" | "not-started" | "notstarted" => Ok(Stage::NotStarted),
            "1" | "in-progress" | "inprogress" | "doing" => Ok(Stage::InProgress),
            "2" | "done" | "completed" => Ok(Stage::Completed),
            _ => anyhow::bail!("Invalid stage: {s}. Use: todo, in-progress, done (or 0, 1, 2)"),
        }
    }
}
