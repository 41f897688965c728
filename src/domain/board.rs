//! Board aggregate and its mutations
//!
//! A [`Board`] is an immutable snapshot: every operation borrows the current
//! board and returns a new one. A failed operation returns an error and the
//! caller keeps the snapshot it already had, so a half-applied splice is
//! never observable.
//!
//! Not-found IDs on edit, delete and toggle are no-ops rather than errors.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{IdError, ListId, TaskId};
use super::list::List;
use super::task::Task;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Blank title on add or edit
    #[error("{0}")]
    Validation(String),

    /// Out-of-range index or unknown container in a reorder/move
    #[error("Index out of range: {0}")]
    Index(String),

    #[error("Duplicate list ID: {0}")]
    DuplicateList(ListId),

    #[error("Task {task} already exists in list {list}")]
    DuplicateTask { list: ListId, task: TaskId },

    #[error(transparent)]
    Id(#[from] IdError),
}

impl BoardError {
    /// Returns true for errors caused by user input rather than a caller bug
    pub fn is_validation(&self) -> bool {
        matches!(self, BoardError::Validation(_))
    }
}

fn require_title(title: &str, what: &str) -> Result<(), BoardError> {
    if title.trim().is_empty() {
        return Err(BoardError::Validation(format!(
            "{} title must not be empty",
            what
        )));
    }
    Ok(())
}

/// Removes the element at `from` and reinserts it at `to` in the shortened sequence
fn splice<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}

/// The root aggregate: lists in display order
///
/// Serializes as a bare JSON array of lists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    pub lists: Vec<List>,
}

impl Board {
    pub fn new(lists: Vec<List>) -> Self {
        Self { lists }
    }

    /// The built-in board used on first start and when the saved one is unreadable
    pub fn seeded() -> Self {
        Self::new(vec![
            List::new(ListId::new(1), "Sprint 1 (1/21-2/3)").with_tasks(vec![
                Task::new(TaskId::new(1), "Sign-up"),
                Task::new(TaskId::new(2), "Login").toggled(),
            ]),
            List::new(ListId::new(2), "Sprint 2 (2/4-2/17)").with_tasks(vec![
                Task::new(TaskId::new(3), "Activity log view"),
                Task::new(TaskId::new(4), "Post to Twitter"),
            ]),
        ])
    }

    pub fn list(&self, list_id: ListId) -> Option<&List> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    pub fn list_position(&self, list_id: ListId) -> Option<usize> {
        self.lists.iter().position(|l| l.id == list_id)
    }

    pub fn task(&self, list_id: ListId, task_id: TaskId) -> Option<&Task> {
        self.list(list_id).and_then(|l| l.task(task_id))
    }

    /// Total number of tasks across all lists
    pub fn task_count(&self) -> usize {
        self.lists.iter().map(List::len).sum()
    }

    pub fn list_ids(&self) -> Vec<ListId> {
        self.lists.iter().map(|l| l.id).collect()
    }

    /// Every task ID on the board paired with the list that holds it
    pub fn task_ids(&self) -> Vec<(ListId, TaskId)> {
        self.lists
            .iter()
            .flat_map(|l| l.tasks.iter().map(move |t| (l.id, t.id)))
            .collect()
    }

    /// Largest list or task ID on the board, used to keep the ID generator ahead
    pub fn max_id(&self) -> Option<u64> {
        let lists = self.lists.iter().map(|l| l.id.get());
        let tasks = self.lists.iter().flat_map(|l| l.tasks.iter().map(|t| t.id.get()));
        lists.chain(tasks).max()
    }

    /// Checks the ID uniqueness and non-blank title invariants
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut seen = HashSet::new();
        for list in &self.lists {
            if !seen.insert(list.id) {
                return Err(BoardError::DuplicateList(list.id));
            }
            require_title(&list.title, "List")?;
            for task in &list.tasks {
                require_title(&task.title, "Task")?;
            }
            if let Some(task) = list.duplicate_task_id() {
                return Err(BoardError::DuplicateTask {
                    list: list.id,
                    task,
                });
            }
        }
        Ok(())
    }

    fn map_list(&self, list_id: ListId, f: impl FnOnce(&List) -> List) -> Board {
        let Some(pos) = self.list_position(list_id) else {
            return self.clone();
        };
        let mut next = self.clone();
        next.lists[pos] = f(&self.lists[pos]);
        next
    }

    fn map_task(&self, list_id: ListId, task_id: TaskId, f: impl FnOnce(&Task) -> Task) -> Board {
        self.map_list(list_id, |list| {
            let mut list = list.clone();
            if let Some(pos) = list.position_of(task_id) {
                list.tasks[pos] = f(&list.tasks[pos]);
            }
            list
        })
    }

    /// Appends a new empty list
    pub fn add_list(&self, id: ListId, title: &str) -> Result<Board, BoardError> {
        require_title(title, "List")?;
        if self.list(id).is_some() {
            return Err(BoardError::DuplicateList(id));
        }
        let mut next = self.clone();
        next.lists.push(List::new(id, title));
        Ok(next)
    }

    /// Renames a list; unknown IDs leave the board unchanged
    pub fn edit_list_title(&self, list_id: ListId, title: &str) -> Result<Board, BoardError> {
        require_title(title, "List")?;
        Ok(self.map_list(list_id, |list| List {
            title: title.to_string(),
            ..list.clone()
        }))
    }

    /// Removes a list together with all of its tasks
    pub fn delete_list(&self, list_id: ListId) -> Board {
        Board::new(
            self.lists
                .iter()
                .filter(|l| l.id != list_id)
                .cloned()
                .collect(),
        )
    }

    /// Appends a `todo` task to the end of a list; unknown lists are a no-op
    pub fn add_task(&self, list_id: ListId, id: TaskId, title: &str) -> Result<Board, BoardError> {
        require_title(title, "Task")?;
        if self.list(list_id).is_some_and(|l| l.contains(id)) {
            return Err(BoardError::DuplicateTask {
                list: list_id,
                task: id,
            });
        }
        Ok(self.map_list(list_id, |list| {
            let mut list = list.clone();
            list.tasks.push(Task::new(id, title));
            list
        }))
    }

    pub fn edit_task_title(
        &self,
        list_id: ListId,
        task_id: TaskId,
        title: &str,
    ) -> Result<Board, BoardError> {
        require_title(title, "Task")?;
        Ok(self.map_task(list_id, task_id, |task| task.with_title(title)))
    }

    pub fn delete_task(&self, list_id: ListId, task_id: TaskId) -> Board {
        self.map_list(list_id, |list| {
            let mut list = list.clone();
            list.tasks.retain(|t| t.id != task_id);
            list
        })
    }

    /// Flips a task between `todo` and `done`
    pub fn toggle_task_status(&self, list_id: ListId, task_id: TaskId) -> Board {
        self.map_task(list_id, task_id, Task::toggled)
    }

    /// Moves the list at `from` so that it ends up at `to`
    pub fn reorder_lists(&self, from: usize, to: usize) -> Result<Board, BoardError> {
        let len = self.lists.len();
        if from >= len || to >= len {
            return Err(BoardError::Index(format!(
                "cannot move list from {} to {} on a board with {} lists",
                from, to, len
            )));
        }
        let mut next = self.clone();
        splice(&mut next.lists, from, to);
        Ok(next)
    }

    /// Moves a task within a list or across lists
    ///
    /// `dest_index` is read against the destination after the task has been
    /// removed, so within one list the valid range is `0..len` and across
    /// lists it is `0..=len(dest)`.
    pub fn move_task(
        &self,
        source_list: ListId,
        source_index: usize,
        dest_list: ListId,
        dest_index: usize,
    ) -> Result<Board, BoardError> {
        let src_pos = self
            .list_position(source_list)
            .ok_or_else(|| BoardError::Index(format!("unknown source list {}", source_list)))?;
        let dst_pos = self
            .list_position(dest_list)
            .ok_or_else(|| BoardError::Index(format!("unknown destination list {}", dest_list)))?;

        let source = &self.lists[src_pos];
        if source_index >= source.len() {
            return Err(BoardError::Index(format!(
                "no task at index {} in list {} ({} tasks)",
                source_index,
                source_list,
                source.len()
            )));
        }

        // Length of the destination once the moving task has left it
        let dest_len = if src_pos == dst_pos {
            source.len() - 1
        } else {
            self.lists[dst_pos].len()
        };
        if dest_index > dest_len {
            return Err(BoardError::Index(format!(
                "cannot insert at index {} in list {} ({} tasks)",
                dest_index, dest_list, dest_len
            )));
        }

        let mut next = self.clone();
        if src_pos == dst_pos {
            splice(&mut next.lists[src_pos].tasks, source_index, dest_index);
            return Ok(next);
        }

        let moving = source.tasks[source_index].id;
        if self.lists[dst_pos].contains(moving) {
            return Err(BoardError::DuplicateTask {
                list: dest_list,
                task: moving,
            });
        }

        let task = next.lists[src_pos].tasks.remove(source_index);
        next.lists[dst_pos].tasks.insert(dest_index, task);
        Ok(next)
    }
}
