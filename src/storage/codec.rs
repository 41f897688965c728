//! Board document encoding
//!
//! The board is stored as a single JSON array of lists under one key. A
//! document that fails to parse, or parses but breaks the ID uniqueness or
//! non-blank title invariants, is replaced by [`Board::seeded`] on load.

use anyhow::{Context, Result};

use crate::domain::Board;

/// Default key of the slot holding the board
pub const STORAGE_KEY: &str = "todo-board-lists";

/// Serializes a board to its stored form
pub fn encode(board: &Board) -> Result<String> {
    serde_json::to_string(board).context("Failed to serialize board")
}

/// Parses and validates a stored board
pub fn decode(text: &str) -> Result<Board> {
    let board: Board = serde_json::from_str(text).context("Failed to parse board document")?;
    board.validate().context("Board document is inconsistent")?;
    Ok(board)
}

/// Decodes the stored slot, falling back to the seeded board
pub fn decode_or_seed(text: Option<&str>) -> Board {
    let Some(text) = text else {
        tracing::debug!("no saved board, using seeded board");
        return Board::seeded();
    };

    match decode(text) {
        Ok(board) => board,
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "saved board unreadable, using seeded board");
            Board::seeded()
        }
    }
}
