//! # Command-Line Interface
//!
//! The `board` front end: turns arguments into board operations and prints
//! the resulting board.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Workspace and board | `init`, `show`, `reset --yes` |
//! | List | Columns | `list add`, `list rename`, `list delete --yes`, `list move` |
//! | Task | Cards | `task add`, `task edit`, `task toggle`, `task move` |
//! | Drop | Drag-and-drop results | `drop '<descriptor json>'` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! board --verbose task move 1 0 2 1
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod list;
mod task;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
