//! Priority ordering for display.
//!
//! A selection sort: each pass takes the largest remaining priority code
//! (the least important task) and prepends it to the result. Among equal
//! codes the last occurrence is taken, so equal-priority tasks keep their
//! original relative order. O(n²), fine for a personal task list.

use crate::models::{Task, TaskList};

/// Return a new list ordered High → Medium → Low, stable within a priority.
pub fn sort_by_priority(list: &TaskList) -> TaskList {
    if list.len() < 2 {
        return list.clone();
    }

    let mut remaining: Vec<&Task> = list.iter().collect();
    // Built back to front, reversed once at the end instead of prepending.
    let mut picked: Vec<Task> = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let mut max_idx = 0;
        for (idx, task) in remaining.iter().enumerate().skip(1) {
            if task.priority >= remaining[max_idx].priority {
                max_idx = idx;
            }
        }
        picked.push(remaining.remove(max_idx).clone());
    }

    picked.reverse();
    TaskList::from(picked)
}
