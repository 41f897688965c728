//! Drag-and-drop move resolution
//!
//! A drag source reports each finished gesture as a [`MoveDescriptor`]. The
//! resolver turns it into exactly one board operation:
//!
//! | Item | Containers | Operation |
//! |------|------------|-----------|
//! | list | ignored | [`Board::reorder_lists`] |
//! | task | same list | [`Board::move_task`] within the list |
//! | task | different lists | [`Board::move_task`] across lists |
//!
//! A descriptor without a destination index is a cancelled drop and resolves
//! to [`Resolution::Cancelled`], which leaves the board untouched.
//!
//! Dropping an item back where it started still goes through the splice, so
//! in-place drops share the code path of every other reorder.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{Board, BoardError};
use super::id::ListId;

/// Container ID a drag source uses for the board-level list row
pub const LISTS_CONTAINER: &str = "all-lists";

/// What is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    List,
    Task,
}

/// Drop container ID as reported by the drag source
///
/// Task containers carry the list ID as a decimal string. Numbers are
/// accepted as well when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawContainerId")]
pub struct ContainerId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawContainerId {
    Text(String),
    Number(u64),
}

impl From<RawContainerId> for ContainerId {
    fn from(raw: RawContainerId) -> Self {
        match raw {
            RawContainerId::Text(s) => Self(s),
            RawContainerId::Number(n) => Self(n.to_string()),
        }
    }
}

impl ContainerId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The container holding the lists themselves
    pub fn lists() -> Self {
        Self(LISTS_CONTAINER.to_string())
    }

    /// Interprets this container as a list, if it names one
    pub fn list_id(&self) -> Option<ListId> {
        self.0.parse().ok()
    }
}

impl From<ListId> for ContainerId {
    fn from(id: ListId) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a completed drag gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDescriptor {
    pub item_kind: ItemKind,
    pub source_container_id: ContainerId,
    pub source_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_container_id: Option<ContainerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_index: Option<usize>,
}

impl MoveDescriptor {
    /// A list drag from `from` to `to` (`None` when dropped outside the board)
    pub fn list(from: usize, to: Option<usize>) -> Self {
        Self {
            item_kind: ItemKind::List,
            source_container_id: ContainerId::lists(),
            source_index: from,
            dest_container_id: to.map(|_| ContainerId::lists()),
            dest_index: to,
        }
    }

    /// A task drag out of `source_list`; `dest` is `None` for a cancelled drop
    pub fn task(source_list: ListId, source_index: usize, dest: Option<(ListId, usize)>) -> Self {
        Self {
            item_kind: ItemKind::Task,
            source_container_id: source_list.into(),
            source_index,
            dest_container_id: dest.map(|(list, _)| list.into()),
            dest_index: dest.map(|(_, index)| index),
        }
    }
}

/// The single board operation a descriptor maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Cancelled,
    ReorderLists {
        from: usize,
        to: usize,
    },
    MoveTask {
        source_list: ListId,
        source_index: usize,
        dest_list: ListId,
        dest_index: usize,
    },
}

impl Resolution {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Resolution::Cancelled)
    }

    /// True for task moves that stay inside one list
    pub fn is_same_list(&self) -> bool {
        matches!(self, Resolution::MoveTask { source_list, dest_list, .. } if source_list == dest_list)
    }

    /// Applies the operation to `board`, returning the next snapshot
    pub fn apply(&self, board: &Board) -> Result<Board, BoardError> {
        match *self {
            Resolution::Cancelled => Ok(board.clone()),
            Resolution::ReorderLists { from, to } => board.reorder_lists(from, to),
            Resolution::MoveTask {
                source_list,
                source_index,
                dest_list,
                dest_index,
            } => board.move_task(source_list, source_index, dest_list, dest_index),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Cancelled => write!(f, "cancelled"),
            Resolution::ReorderLists { from, to } => write!(f, "reorder list {} -> {}", from, to),
            Resolution::MoveTask {
                source_list,
                source_index,
                dest_list,
                dest_index,
            } => write!(
                f,
                "move task {}[{}] -> {}[{}]",
                source_list, source_index, dest_list, dest_index
            ),
        }
    }
}

fn task_container(id: &ContainerId) -> Result<ListId, BoardError> {
    id.list_id()
        .ok_or_else(|| BoardError::Index(format!("'{}' is not a task container", id)))
}

/// Interprets a descriptor without touching any board
pub fn resolve(descriptor: &MoveDescriptor) -> Result<Resolution, BoardError> {
    let Some(dest_index) = descriptor.dest_index else {
        return Ok(Resolution::Cancelled);
    };

    match descriptor.item_kind {
        ItemKind::List => Ok(Resolution::ReorderLists {
            from: descriptor.source_index,
            to: dest_index,
        }),
        ItemKind::Task => {
            let Some(dest_container) = &descriptor.dest_container_id else {
                return Ok(Resolution::Cancelled);
            };
            let source_list = task_container(&descriptor.source_container_id)?;
            let dest_list = task_container(dest_container)?;
            Ok(Resolution::MoveTask {
                source_list,
                source_index: descriptor.source_index,
                dest_list,
                dest_index,
            })
        }
    }
}

/// Resolves and applies a descriptor in one step
pub fn apply_move(board: &Board, descriptor: &MoveDescriptor) -> Result<Board, BoardError> {
    resolve(descriptor)?.apply(board)
}
