//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::output::{Output, OutputFormat};
use super::{list, task};
use crate::domain::{resolve, MoveDescriptor};
use crate::storage::{BlobStore, BoardStore, Config, Workspace};

#[derive(Parser)]
#[command(name = "board")]
#[command(author, version, about = "Local-first kanban board")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Workspace directory (defaults to searching upward from the current directory)
    #[arg(long, global = true, env = "BOARD_DIR")]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new board workspace
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Show the board
    Show,

    /// Manage lists (board columns)
    #[command(subcommand)]
    List(list::ListCommands),

    /// Manage tasks
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Apply a drag-and-drop result given as JSON
    ///
    /// Example:
    ///   board drop '{"item_kind":"task","source_container_id":"1","source_index":0,
    ///                "dest_container_id":"2","dest_index":1}'
    ///
    /// Leave out dest_index to report a cancelled drag.
    Drop {
        /// Move descriptor JSON
        descriptor: String,
    },

    /// Replace the board with the starter board
    Reset {
        /// Confirm discarding every list and task
        #[arg(long)]
        yes: bool,
    },
}

/// Installs the tracing subscriber
///
/// Tracing is opt-in via RUST_LOG; `--verbose` turns on debug output for this crate.
fn init_tracing(verbose: bool) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| {
            if verbose {
                EnvFilter::new("taskboard=debug")
            } else {
                EnvFilter::new("off")
            }
        });

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format.unwrap_or_else(|| {
        Config::load_global()
            .map(|global| OutputFormat::from(global.default_format))
            .unwrap_or_default()
    });
    let output = Output::new(format, cli.verbose);
    init_tracing(output.is_verbose());

    output.verbose("Board CLI starting");

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing workspace at: {}", path));
            let workspace = Workspace::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Board stored at: {}", workspace.board_path().display()),
            );
            output.success(&format!(
                "Initialized board workspace at {}",
                workspace.root().display()
            ));
        }

        Commands::Show => {
            let workspace = open_workspace(&output, cli.dir.as_deref())?;
            let store = workspace.board_store();
            output.board(store.board());
        }

        Commands::List(cmd) => {
            let workspace = open_workspace(&output, cli.dir.as_deref())?;
            list::run(cmd, &workspace, &output)?
        }

        Commands::Task(cmd) => {
            let workspace = open_workspace(&output, cli.dir.as_deref())?;
            task::run(cmd, &workspace, &output)?
        }

        Commands::Drop { descriptor } => {
            let workspace = open_workspace(&output, cli.dir.as_deref())?;
            drop_item(&workspace, &output, &descriptor)?
        }

        Commands::Reset { yes } => {
            if !yes {
                anyhow::bail!("Refusing to reset the board without --yes");
            }
            let workspace = open_workspace(&output, cli.dir.as_deref())?;
            let mut store = workspace.board_store();
            store.reset();
            report_write_failure(&output, &store);
            if output.is_json() {
                output.board(store.board());
            } else {
                output.success("Board reset to the starter board");
            }
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

fn open_workspace(output: &Output, dir: Option<&Path>) -> Result<Workspace> {
    let workspace = Workspace::locate(dir)?;
    output.verbose_ctx(
        "workspace",
        &format!("Opened workspace at: {}", workspace.root().display()),
    );
    Ok(workspace)
}

/// Warns when the last change could not be written
pub(crate) fn report_write_failure<S: BlobStore>(output: &Output, store: &BoardStore<S>) {
    if let Some(error) = store.last_write_error() {
        output.warn(&format!("change applied but not saved: {}", error));
    }
}

/// Applies a raw drag-and-drop descriptor
fn drop_item(workspace: &Workspace, output: &Output, raw: &str) -> Result<()> {
    let descriptor: MoveDescriptor =
        serde_json::from_str(raw).context("Invalid move descriptor")?;
    let resolution = resolve(&descriptor)?;
    output.verbose_ctx("drop", &format!("Resolved to: {}", resolution));

    let mut store = workspace.board_store();
    store.apply_move(&descriptor)?;
    report_write_failure(output, &store);

    if output.is_json() {
        output.data(&serde_json::json!({
            "applied": !resolution.is_cancelled(),
            "resolution": resolution.to_string(),
            "board": store.board(),
        }));
    } else if resolution.is_cancelled() {
        output.success("Drop cancelled, board unchanged");
    } else {
        output.success(&format!("Applied {}", resolution));
    }

    Ok(())
}
