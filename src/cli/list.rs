//! List CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::app::report_write_failure;
use super::output::Output;
use crate::domain::ListId;
use crate::storage::Workspace;

#[derive(Subcommand)]
pub enum ListCommands {
    /// Add a list at the end of the board
    Add {
        /// List title
        title: String,
    },

    /// Rename a list
    Rename {
        /// List ID
        id: String,

        /// New title
        title: String,
    },

    /// Delete a list and every task in it
    Delete {
        /// List ID
        id: String,

        /// Confirm deleting the list and its tasks
        #[arg(long)]
        yes: bool,
    },

    /// Move a list to another position (0-based)
    Move {
        /// Current position
        from: usize,

        /// New position
        to: usize,
    },
}

pub fn run(cmd: ListCommands, workspace: &Workspace, output: &Output) -> Result<()> {
    match cmd {
        ListCommands::Add { title } => add_list(workspace, output, &title),
        ListCommands::Rename { id, title } => rename_list(workspace, output, &id, &title),
        ListCommands::Delete { id, yes } => delete_list(workspace, output, &id, yes),
        ListCommands::Move { from, to } => move_list(workspace, output, from, to),
    }
}

fn add_list(workspace: &Workspace, output: &Output, title: &str) -> Result<()> {
    let mut store = workspace.board_store();
    let id = store.add_list(title)?;
    report_write_failure(output, &store);

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "title": title,
            "position": store.board().lists.len() - 1,
        }));
    } else {
        output.success(&format!("Created list: {} - {}", id, title));
    }

    Ok(())
}

fn rename_list(workspace: &Workspace, output: &Output, id_str: &str, title: &str) -> Result<()> {
    let id: ListId = id_str.parse()?;
    let mut store = workspace.board_store();

    if store.board().list(id).is_none() {
        output.verbose_ctx("list", &format!("List {} not found, nothing renamed", id));
    }
    store.edit_list_title(id, title)?;
    report_write_failure(output, &store);

    match store.board().list(id) {
        Some(list) if output.is_json() => output.data(list),
        Some(list) => output.success(&format!("Renamed list {} to {}", id, list.title)),
        None => output.success(&format!("No list {}, nothing changed", id)),
    }

    Ok(())
}

fn delete_list(workspace: &Workspace, output: &Output, id_str: &str, yes: bool) -> Result<()> {
    let id: ListId = id_str.parse()?;
    if !yes {
        anyhow::bail!(
            "Deleting list {} also deletes its tasks. Re-run with --yes to confirm.",
            id
        );
    }

    let mut store = workspace.board_store();
    let removed = store.delete_list(id);
    report_write_failure(output, &store);

    match removed {
        Some(list) if output.is_json() => output.data(&serde_json::json!({
            "deleted": true,
            "id": list.id,
            "tasks_deleted": list.len(),
        })),
        Some(list) => output.success(&format!(
            "Deleted list {} - {} ({} tasks)",
            list.id,
            list.title,
            list.len()
        )),
        None if output.is_json() => output.data(&serde_json::json!({
            "deleted": false,
            "id": id,
        })),
        None => output.success(&format!("No list {}, nothing changed", id)),
    }

    Ok(())
}

fn move_list(workspace: &Workspace, output: &Output, from: usize, to: usize) -> Result<()> {
    let mut store = workspace.board_store();
    output.verbose_ctx("list", &format!("Moving list {} -> {}", from, to));

    let board = store.reorder_lists(from, to)?;
    if output.is_json() {
        output.board(board);
    } else {
        let order: Vec<String> = board.lists.iter().map(|l| l.title.clone()).collect();
        output.success(&format!("List order: {}", order.join(" | ")));
    }
    report_write_failure(output, &store);

    Ok(())
}
