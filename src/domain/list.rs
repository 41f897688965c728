//! List domain model
//!
//! A list is a named, ordered column of tasks.

use serde::{Deserialize, Serialize};

use super::id::{ListId, TaskId};
use super::task::Task;

/// An ordered, named container of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Unique identifier
    pub id: ListId,

    /// Column heading
    pub title: String,

    /// Tasks in display order
    pub tasks: Vec<Task>,
}

impl List {
    /// Creates an empty list
    pub fn new(id: ListId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            tasks: Vec::new(),
        }
    }

    /// Builder-style helper for seeding a list with tasks
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Returns the position of a task in this list
    pub fn position_of(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }

    /// Looks up a task by ID
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn contains(&self, task_id: TaskId) -> bool {
        self.position_of(task_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks marked done
    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_done()).count()
    }

    /// Returns the first task ID that appears more than once, if any
    pub(crate) fn duplicate_task_id(&self) -> Option<TaskId> {
        let mut seen = std::collections::HashSet::new();
        self.tasks.iter().map(|t| t.id).find(|id| !seen.insert(*id))
    }
}
