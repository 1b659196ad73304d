//! Error types for the task engine.
//!
//! Only conditions the caller may want to report are errors. Malformed
//! persisted lines are not: the codec skips or coerces them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::stage::Stage;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Cannot access {}: {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed {field}: {reason}")]
    MalformedRecord { field: &'static str, reason: String },

    #[error("Invalid priority {0}. Use 1 (High), 2 (Medium) or 3 (Low)")]
    InvalidPriority(i32),

    #[error("Invalid status {0}. Use 0 (not started), 1 (in progress) or 2 (completed)")]
    InvalidStatus(i32),

    #[error("Task '{name}' not found in {stage}")]
    NotFound { stage: Stage, name: String },

    #[error("Task is already in {0}")]
    SameStage(Stage),

    #[error("{stage} not saved: {} could not be read, so it was left untouched", path.display())]
    NotSaved { stage: Stage, path: PathBuf },

    #[error("Invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl TaskError {
    /// True for a store file that simply does not exist yet (first run).
    pub fn is_missing_file(&self) -> bool {
        matches!(
            self,
            TaskError::ResourceUnavailable { source, .. } if source.kind() == io::ErrorKind::NotFound
        )
    }
}

pub type Result<T, E = TaskError> = std::result::Result<T, E>;
