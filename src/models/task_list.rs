use serde::Serialize;

use crate::models::task::Task;

/// Ordered tasks of one stage.
///
/// Order matters for storage (file order is list order) and for raw inserts,
/// which always go to the front. Display re-sorts through
/// [`TaskList::sort_by_priority`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a task at the head of the list
    pub fn push_front(&mut self, task: Task) -> &Task {
        self.tasks.insert(0, task);
        &self.tasks[0]
    }

    /// Append a task at the tail. Used when decoding in file order.
    pub fn push_back(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Index of the first task named exactly `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.name == name)
    }

    /// First task named exactly `name`
    pub fn find(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// Unlink and return the first task named exactly `name`
    pub fn remove_by_name(&mut self, name: &str) -> Option<Task> {
        let idx = self.position(name)?;
        Some(self.tasks.remove(idx))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Names in list order
    pub fn names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name.as_str()).collect()
    }

    /// A copy of this list ordered by priority, see [`crate::sort`]
    pub fn sort_by_priority(&self) -> TaskList {
        crate::sort::sort_by_priority(self)
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TaskList {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.into_iter()
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
