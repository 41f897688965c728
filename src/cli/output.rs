//! Output formatting for CLI commands

use serde::Serialize;

use crate::domain::{Board, List, Task};
use crate::storage;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<storage::OutputFormat> for OutputFormat {
    fn from(format: storage::OutputFormat) -> Self {
        match format {
            storage::OutputFormat::Text => OutputFormat::Text,
            storage::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints a warning (stderr, both formats)
    pub fn warn(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Text => {
                // Text callers without a dedicated renderer get pretty JSON
                if let Ok(json) = serde_json::to_string_pretty(data) {
                    println!("{}", json);
                }
            }
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(data) {
                    println!("{}", json);
                }
            }
        }
    }

    /// Prints the whole board
    pub fn board(&self, board: &Board) {
        if self.is_json() {
            self.data(board);
            return;
        }

        if board.lists.is_empty() {
            println!("Board is empty. Add a list with 'board list add <TITLE>'.");
            return;
        }

        for (index, list) in board.lists.iter().enumerate() {
            if index > 0 {
                println!();
            }
            self.list_text(index, list);
        }
    }

    fn list_text(&self, index: usize, list: &List) {
        println!(
            "[{}] {}  (id {}, {}/{} done)",
            index,
            list.title,
            list.id,
            list.done_count(),
            list.len()
        );
        if list.is_empty() {
            println!("    (no tasks)");
        }
        for (pos, task) in list.tasks.iter().enumerate() {
            println!("    {}", task_line(pos, task));
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Returns true if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}

/// One task as a text row: `[pos] [x] title  (id N)`
pub fn task_line(pos: usize, task: &Task) -> String {
    let mark = if task.is_done() { "x" } else { " " };
    format!("[{}] [{}] {}  (id {})", pos, mark, task.title, task.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskId;

    #[test]
    fn task_line_marks_done() {
        let task = Task::new(TaskId::new(7), "Ship it");
        assert_eq!(task_line(0, &task), "[0] [ ] Ship it  (id 7)");
        assert_eq!(task_line(2, &task.toggled()), "[2] [x] Ship it  (id 7)");
    }

    #[test]
    fn converts_config_format() {
        assert_eq!(OutputFormat::from(storage::OutputFormat::Json), OutputFormat::Json);
        assert_eq!(OutputFormat::from(storage::OutputFormat::Text), OutputFormat::Text);
    }
}
