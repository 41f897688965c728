//! Domain models for the task board
//!
//! Contains the board state engine without any I/O concerns.

mod id;
mod task;
mod list;
mod board;
pub mod moves;

pub use id::{IdError, IdGenerator, ListId, TaskId};
pub use task::{Task, TaskStatus};
pub use list::List;
pub use board::{Board, BoardError};
pub use moves::{apply_move, resolve, ContainerId, ItemKind, MoveDescriptor, Resolution};
