//! Persistent board state container
//!
//! [`BoardStore`] owns the current [`Board`] snapshot, the session ID
//! generator and a [`BlobStore`]. Every successful operation computes the
//! next snapshot from the current one, swaps it in and writes it out before
//! returning, even when nothing changed. Rejected operations and cancelled
//! drops never write.
//!
//! Write failures are logged and remembered in
//! [`BoardStore::last_write_error`] but never returned from a mutation: the
//! in-memory board stays authoritative for the session.

use anyhow::Result;

use super::blob::BlobStore;
use super::codec::{self, STORAGE_KEY};
use crate::domain::{
    resolve, Board, BoardError, IdGenerator, List, ListId, MoveDescriptor, Task, TaskId,
    TaskStatus,
};

/// The board plus everything needed to mutate and persist it
pub struct BoardStore<S: BlobStore> {
    board: Board,
    ids: IdGenerator,
    blob: S,
    key: String,
    last_write_error: Option<String>,
}

impl<S: BlobStore> BoardStore<S> {
    /// Loads the board from the default slot
    pub fn open(blob: S) -> Self {
        Self::open_with_key(blob, STORAGE_KEY)
    }

    /// Loads the board from `key`, falling back to the seeded board
    pub fn open_with_key(blob: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let saved = match blob.get(&key) {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!(key = %key, error = %format!("{:#}", e), "failed to read saved board");
                None
            }
        };
        let board = codec::decode_or_seed(saved.as_deref());
        Self::with_board(blob, key, board, IdGenerator::from_clock())
    }

    /// Wraps an existing board without reading storage
    pub fn with_board(blob: S, key: impl Into<String>, board: Board, mut ids: IdGenerator) -> Self {
        if let Some(max) = board.max_id() {
            ids.observe(max);
        }
        Self {
            board,
            ids,
            blob,
            key: key.into(),
            last_write_error: None,
        }
    }

    /// Current snapshot
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn blob_store(&self) -> &S {
        &self.blob
    }

    /// Error from the most recent write, cleared by the next successful one
    pub fn last_write_error(&self) -> Option<&str> {
        self.last_write_error.as_deref()
    }

    /// Writes the current snapshot, returning any storage error
    pub fn save(&mut self) -> Result<()> {
        let text = codec::encode(&self.board)?;
        self.blob.set(&self.key, &text)?;
        tracing::debug!(key = %self.key, bytes = text.len(), "board saved");
        Ok(())
    }

    fn persist(&mut self) {
        match self.save() {
            Ok(()) => self.last_write_error = None,
            Err(e) => {
                let message = format!("{:#}", e);
                tracing::warn!(key = %self.key, error = %message, "failed to save board");
                self.last_write_error = Some(message);
            }
        }
    }

    fn commit(&mut self, next: Board, op: &str) -> &Board {
        if next == self.board {
            tracing::debug!(op, "applied without changes");
        } else {
            tracing::debug!(op, lists = next.lists.len(), tasks = next.task_count(), "applied");
            self.board = next;
        }
        self.persist();
        &self.board
    }

    /// Appends a new list and returns its ID
    pub fn add_list(&mut self, title: &str) -> Result<ListId, BoardError> {
        let id = self.ids.next_list_id()?;
        let next = self.board.add_list(id, title)?;
        self.commit(next, "add_list");
        Ok(id)
    }

    pub fn edit_list_title(&mut self, list_id: ListId, title: &str) -> Result<(), BoardError> {
        let next = self.board.edit_list_title(list_id, title)?;
        self.commit(next, "edit_list_title");
        Ok(())
    }

    /// Deletes a list and its tasks, returning what was removed
    pub fn delete_list(&mut self, list_id: ListId) -> Option<List> {
        let removed = self.board.list(list_id).cloned();
        let next = self.board.delete_list(list_id);
        self.commit(next, "delete_list");
        removed
    }

    /// Adds a task; `Ok(None)` when the list does not exist
    pub fn add_task(&mut self, list_id: ListId, title: &str) -> Result<Option<TaskId>, BoardError> {
        let id = self.ids.next_task_id()?;
        let next = self.board.add_task(list_id, id, title)?;
        let added = next.task(list_id, id).is_some();
        self.commit(next, "add_task");
        Ok(added.then_some(id))
    }

    pub fn edit_task_title(
        &mut self,
        list_id: ListId,
        task_id: TaskId,
        title: &str,
    ) -> Result<(), BoardError> {
        let next = self.board.edit_task_title(list_id, task_id, title)?;
        self.commit(next, "edit_task_title");
        Ok(())
    }

    /// Deletes a task, returning it if it existed
    pub fn delete_task(&mut self, list_id: ListId, task_id: TaskId) -> Option<Task> {
        let removed = self.board.task(list_id, task_id).cloned();
        let next = self.board.delete_task(list_id, task_id);
        self.commit(next, "delete_task");
        removed
    }

    /// Toggles a task, returning its new status if it exists
    pub fn toggle_task_status(&mut self, list_id: ListId, task_id: TaskId) -> Option<TaskStatus> {
        let next = self.board.toggle_task_status(list_id, task_id);
        let status = next.task(list_id, task_id).map(|t| t.status);
        self.commit(next, "toggle_task_status");
        status
    }

    pub fn reorder_lists(&mut self, from: usize, to: usize) -> Result<&Board, BoardError> {
        let next = self.board.reorder_lists(from, to)?;
        Ok(self.commit(next, "reorder_lists"))
    }

    pub fn move_task(
        &mut self,
        source_list: ListId,
        source_index: usize,
        dest_list: ListId,
        dest_index: usize,
    ) -> Result<&Board, BoardError> {
        let next = self
            .board
            .move_task(source_list, source_index, dest_list, dest_index)?;
        Ok(self.commit(next, "move_task"))
    }

    /// Entry point for the drag source: resolves and applies one drop
    pub fn apply_move(&mut self, descriptor: &MoveDescriptor) -> Result<&Board, BoardError> {
        let resolution = resolve(descriptor)?;
        if resolution.is_cancelled() {
            tracing::debug!("drop cancelled");
            return Ok(&self.board);
        }
        let next = resolution.apply(&self.board)?;
        Ok(self.commit(next, "apply_move"))
    }

    /// Replaces the board with the seeded default
    pub fn reset(&mut self) -> &Board {
        let seeded = Board::seeded();
        if let Some(max) = seeded.max_id() {
            self.ids.observe(max);
        }
        self.commit(seeded, "reset")
    }
}
