//! The task record and its priority scale.

use serde::{Deserialize, Serialize};

use crate::error::TaskError;
use crate::models::stage::Stage;
use crate::validation::validate_field;

/// Default field separator in store files
pub const DEFAULT_DELIMITER: char = '#';

/// Task importance. Lower numbers sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn code(&self) -> i32 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, TaskError> {
        match code {
            1 => Ok(Priority::High),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::Low),
            other => Err(TaskError::InvalidPriority(other)),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "high" => Ok(Priority::High),
            "2" | "medium" => Ok(Priority::Medium),
            "3" | "low" => Ok(Priority::Low),
            _ => anyhow::bail!("Invalid priority: {s}. Use: high, medium, low (or 1, 2, 3)"),
        }
    }
}

/// A single task.
///
/// `priority` and `status` hold the raw codes. Records built with
/// [`Task::new`] are range-checked; records decoded from a store file are
/// not, so a corrupted file round-trips its values unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub description: String,
    pub priority: i32,
    pub status: i32,
}

impl Task {
    /// Build a validated task using the default delimiter.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        priority: i32,
        status: i32,
    ) -> Result<Self, TaskError> {
        Self::new_with_delimiter(name, description, priority, status, DEFAULT_DELIMITER)
    }

    /// Build a validated task whose text fields must not contain `delimiter`.
    pub fn new_with_delimiter(
        name: impl Into<String>,
        description: impl Into<String>,
        priority: i32,
        status: i32,
        delimiter: char,
    ) -> Result<Self, TaskError> {
        let name = name.into();
        let description = description.into();

        validate_field("name", &name, delimiter)?;
        validate_field("description", &description, delimiter)?;
        Priority::from_code(priority)?;
        Stage::from_code(status)?;

        Ok(Self::from_raw(name, description, priority, status))
    }

    /// Build a task without any checks. Used by the store decoder.
    pub fn from_raw(name: String, description: String, priority: i32, status: i32) -> Self {
        Self {
            name,
            description,
            priority,
            status,
        }
    }

    /// Human-readable priority, tolerating out-of-range codes.
    pub fn priority_label(&self) -> String {
        match Priority::from_code(self.priority) {
            Ok(p) => p.to_string(),
            Err(_) => format!("Unknown({})", self.priority),
        }
    }
}
