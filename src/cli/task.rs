//! Task CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::app::report_write_failure;
use super::output::{task_line, Output};
use crate::domain::{ListId, TaskId};
use crate::storage::Workspace;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task at the end of a list
    ///
    /// Examples:
    ///   board task add 1 "Fix typo"
    Add {
        /// List ID
        list: String,

        /// Task title
        title: String,
    },

    /// Change a task's title
    Edit {
        /// List ID
        list: String,

        /// Task ID
        task: String,

        /// New title
        title: String,
    },

    /// Delete a task
    Delete {
        /// List ID
        list: String,

        /// Task ID
        task: String,
    },

    /// Flip a task between todo and done
    Toggle {
        /// List ID
        list: String,

        /// Task ID
        task: String,
    },

    /// Show task details
    Show {
        /// List ID
        list: String,

        /// Task ID
        task: String,
    },

    /// Move a task by position, within a list or to another list
    ///
    /// Positions are 0-based. The destination position is counted after the
    /// task has been taken out of its source list.
    Move {
        /// Source list ID
        source_list: String,

        /// Position in the source list
        source_index: usize,

        /// Destination list ID
        dest_list: String,

        /// Position in the destination list
        dest_index: usize,
    },
}

pub fn run(cmd: TaskCommands, workspace: &Workspace, output: &Output) -> Result<()> {
    match cmd {
        TaskCommands::Add { list, title } => add_task(workspace, output, &list, &title),
        TaskCommands::Edit { list, task, title } => {
            edit_task(workspace, output, &list, &task, &title)
        }
        TaskCommands::Delete { list, task } => delete_task(workspace, output, &list, &task),
        TaskCommands::Toggle { list, task } => toggle_task(workspace, output, &list, &task),
        TaskCommands::Show { list, task } => show_task(workspace, output, &list, &task),
        TaskCommands::Move {
            source_list,
            source_index,
            dest_list,
            dest_index,
        } => move_task(
            workspace,
            output,
            &source_list,
            source_index,
            &dest_list,
            dest_index,
        ),
    }
}

fn parse_ids(list_str: &str, task_str: &str) -> Result<(ListId, TaskId)> {
    Ok((list_str.parse()?, task_str.parse()?))
}

fn add_task(workspace: &Workspace, output: &Output, list_str: &str, title: &str) -> Result<()> {
    let list_id: ListId = list_str.parse()?;
    let mut store = workspace.board_store();
    let added = store.add_task(list_id, title)?;
    report_write_failure(output, &store);

    match added {
        Some(id) if output.is_json() => output.data(&serde_json::json!({
            "id": id,
            "list": list_id,
            "title": title,
            "status": "todo",
        })),
        Some(id) => output.success(&format!("Created task: {} - {}", id, title)),
        None => output.success(&format!("No list {}, nothing added", list_id)),
    }

    Ok(())
}

fn edit_task(
    workspace: &Workspace,
    output: &Output,
    list_str: &str,
    task_str: &str,
    title: &str,
) -> Result<()> {
    let (list_id, task_id) = parse_ids(list_str, task_str)?;
    let mut store = workspace.board_store();
    store.edit_task_title(list_id, task_id, title)?;
    report_write_failure(output, &store);

    match store.board().task(list_id, task_id) {
        Some(task) if output.is_json() => output.data(task),
        Some(task) => output.success(&format!("Renamed task {} to {}", task.id, task.title)),
        None => output.success(&format!(
            "No task {} in list {}, nothing changed",
            task_id, list_id
        )),
    }

    Ok(())
}

fn delete_task(workspace: &Workspace, output: &Output, list_str: &str, task_str: &str) -> Result<()> {
    let (list_id, task_id) = parse_ids(list_str, task_str)?;
    let mut store = workspace.board_store();
    let removed = store.delete_task(list_id, task_id);
    report_write_failure(output, &store);

    if output.is_json() {
        output.data(&serde_json::json!({
            "deleted": removed.is_some(),
            "id": task_id,
            "list": list_id,
        }));
    } else if let Some(task) = removed {
        output.success(&format!("Deleted task {} - {}", task.id, task.title));
    } else {
        output.success(&format!(
            "No task {} in list {}, nothing changed",
            task_id, list_id
        ));
    }

    Ok(())
}

fn toggle_task(workspace: &Workspace, output: &Output, list_str: &str, task_str: &str) -> Result<()> {
    let (list_id, task_id) = parse_ids(list_str, task_str)?;
    let mut store = workspace.board_store();
    let status = store.toggle_task_status(list_id, task_id);
    report_write_failure(output, &store);

    match status {
        Some(status) if output.is_json() => output.data(&serde_json::json!({
            "id": task_id,
            "list": list_id,
            "status": status,
        })),
        Some(status) => output.success(&format!("Task {} is now {}", task_id, status.as_str())),
        None => output.success(&format!(
            "No task {} in list {}, nothing changed",
            task_id, list_id
        )),
    }

    Ok(())
}

fn show_task(workspace: &Workspace, output: &Output, list_str: &str, task_str: &str) -> Result<()> {
    let (list_id, task_id) = parse_ids(list_str, task_str)?;
    let store = workspace.board_store();
    let board = store.board();

    let list = board
        .list(list_id)
        .ok_or_else(|| anyhow::anyhow!("List not found: {}", list_id))?;
    let position = list
        .position_of(task_id)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {} in list {}", task_id, list_id))?;
    let task = &list.tasks[position];

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": task.id,
            "title": task.title,
            "status": task.status,
            "list": list.id,
            "list_title": list.title,
            "position": position,
        }));
    } else {
        println!("Task: {}", task.id);
        println!("Title: {}", task.title);
        println!("Status: {}", task.status.as_str());
        println!("List: {} ({})", list.title, list.id);
        println!("Position: {}", position);
    }

    Ok(())
}

fn move_task(
    workspace: &Workspace,
    output: &Output,
    source_str: &str,
    source_index: usize,
    dest_str: &str,
    dest_index: usize,
) -> Result<()> {
    let source_list: ListId = source_str.parse()?;
    let dest_list: ListId = dest_str.parse()?;
    let mut store = workspace.board_store();
    output.verbose_ctx(
        "task",
        &format!(
            "Moving {}[{}] -> {}[{}]",
            source_list, source_index, dest_list, dest_index
        ),
    );

    let board = store.move_task(source_list, source_index, dest_list, dest_index)?;
    if output.is_json() {
        output.board(board);
    } else if let Some(task) = board.list(dest_list).and_then(|l| l.tasks.get(dest_index)) {
        output.success(&format!(
            "Moved to list {}: {}",
            dest_list,
            task_line(dest_index, task)
        ));
    }
    report_write_failure(output, &store);

    Ok(())
}
