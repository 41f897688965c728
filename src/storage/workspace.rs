//! Workspace management
//!
//! Handles workspace initialization and opens the board store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::config::WORKSPACE_DIR;
use super::{BoardStore, Config, FileBlobStore};

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Not in a board workspace. Run 'board init' first.")]
    NotInWorkspace,

    #[error("Not a board workspace: {0}")]
    NotAWorkspace(PathBuf),
}

/// A directory holding a `.board/` workspace
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Opens an existing workspace at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(WORKSPACE_DIR).is_dir() {
            return Err(WorkspaceError::NotAWorkspace(root).into());
        }

        let config = Config::for_workspace(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the workspace at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_workspace_root().ok_or(WorkspaceError::NotInWorkspace)?;

        Self::open(root)
    }

    /// Opens `dir` if given, otherwise searches from the current directory
    pub fn locate(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::open(dir),
            None => Self::open_current(),
        }
    }

    /// Initializes a new workspace at the given path
    ///
    /// Safe to run twice: existing config and board data are left alone.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let board_dir = root.join(WORKSPACE_DIR);

        fs::create_dir_all(&board_dir).with_context(|| {
            format!("Failed to create {} directory: {}", WORKSPACE_DIR, board_dir.display())
        })?;

        let config_path = board_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# Task board configuration

# Key of the slot holding the board document
storage_key = "todo-board-lists"
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let workspace = Self::open(root)?;

        // Materialize the seeded board so the slot exists from the start
        let mut store = workspace.board_store();
        if !store.blob_store().path_for(store.key()).exists() {
            store.save()?;
        }

        Ok(workspace)
    }

    /// Returns the workspace root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .board directory path
    pub fn board_dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR)
    }

    /// Returns the blob store backing this workspace
    pub fn blob_store(&self) -> FileBlobStore {
        FileBlobStore::new(self.board_dir())
    }

    /// Returns the file holding the board document
    pub fn board_path(&self) -> PathBuf {
        self.blob_store().path_for(&self.config.workspace.storage_key)
    }

    /// Loads the board, falling back to the seeded board if the slot is unusable
    pub fn board_store(&self) -> BoardStore<FileBlobStore> {
        BoardStore::open_with_key(self.blob_store(), self.config.workspace.storage_key.clone())
    }
}
