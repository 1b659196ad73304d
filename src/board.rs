//! The session context: the three stage lists of one load/save cycle.
//!
//! All mutations go through here. A board is loaded by
//! [`crate::fs::TaskStore::load_all`], changed by exactly one command, then
//! saved and dropped.

use tracing::info;

use crate::error::TaskError;
use crate::models::{Stage, Task, TaskList, DEFAULT_DELIMITER};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    not_started: TaskList,
    in_progress: TaskList,
    completed: TaskList,
    delimiter: char,
    /// Stages whose store file exists but could not be read this cycle
    unreadable: Vec<Stage>,
}

impl Default for Board {
    fn default() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty board whose new tasks are validated against `delimiter`
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            not_started: TaskList::new(),
            in_progress: TaskList::new(),
            completed: TaskList::new(),
            delimiter,
            unreadable: Vec::new(),
        }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn list(&self, stage: Stage) -> &TaskList {
        match stage {
            Stage::NotStarted => &self.not_started,
            Stage::InProgress => &self.in_progress,
            Stage::Completed => &self.completed,
        }
    }

    pub fn list_mut(&mut self, stage: Stage) -> &mut TaskList {
        match stage {
            Stage::NotStarted => &mut self.not_started,
            Stage::InProgress => &mut self.in_progress,
            Stage::Completed => &mut self.completed,
        }
    }

    /// Record that `stage` failed to load, so saving must not replace its file
    pub fn mark_unreadable(&mut self, stage: Stage) {
        if !self.unreadable.contains(&stage) {
            self.unreadable.push(stage);
        }
    }

    pub fn is_unreadable(&self, stage: Stage) -> bool {
        self.unreadable.contains(&stage)
    }

    /// Total number of tasks across all stages
    pub fn len(&self) -> usize {
        Stage::all().iter().map(|s| self.list(*s).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First task named `name` in `stage`
    pub fn find(&self, stage: Stage, name: &str) -> Option<&Task> {
        self.list(stage).find(name)
    }

    /// Create a task and insert it at the front of the list for `status`.
    ///
    /// Duplicate names are allowed.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        priority: i32,
        status: i32,
    ) -> Result<&Task, TaskError> {
        let task = Task::new_with_delimiter(name, description, priority, status, self.delimiter)?;
        let stage = Stage::from_code(task.status)?;

        info!(name = %task.name, %stage, priority = task.priority, "Adding task");
        Ok(self.list_mut(stage).push_front(task))
    }

    /// Remove the first task named `name` from `stage`.
    pub fn delete(&mut self, stage: Stage, name: &str) -> Result<Task, TaskError> {
        let removed = self
            .list_mut(stage)
            .remove_by_name(name)
            .ok_or_else(|| TaskError::NotFound {
                stage,
                name: name.to_string(),
            })?;

        info!(name = %removed.name, %stage, "Deleted task");
        Ok(removed)
    }

    /// Move the first task named `name` from `from` to the front of `to`.
    ///
    /// The task's status is rewritten to match `to`.
    pub fn move_task(&mut self, from: Stage, to: Stage, name: &str) -> Result<&Task, TaskError> {
        if from == to {
            return Err(TaskError::SameStage(from));
        }

        let mut task = self
            .list_mut(from)
            .remove_by_name(name)
            .ok_or_else(|| TaskError::NotFound {
                stage: from,
                name: name.to_string(),
            })?;
        task.status = to.code();

        info!(name = %task.name, %from, %to, "Moved task");
        Ok(self.list_mut(to).push_front(task))
    }

    /// Tasks of `stage` ordered for display
    pub fn sorted(&self, stage: Stage) -> TaskList {
        self.list(stage).sort_by_priority()
    }

    /// Every stage ordered for display, in stage order
    pub fn sorted_all(&self) -> Vec<(Stage, TaskList)> {
        Stage::all()
            .iter()
            .map(|stage| (*stage, self.sorted(*stage)))
            .collect()
    }
}
