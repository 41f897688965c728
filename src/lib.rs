//! Taskboard - a local-first kanban board
//!
//! A board is an ordered sequence of lists, each holding an ordered sequence
//! of tasks. The [`domain`] module holds the state engine: immutable board
//! snapshots, their mutations, and the resolver that turns drag-and-drop
//! results into moves. [`storage`] persists the board after every change,
//! and [`cli`] is a thin command-line front end.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Board, BoardError, List, ListId, MoveDescriptor, Task, TaskId, TaskStatus};
pub use storage::BoardStore;
