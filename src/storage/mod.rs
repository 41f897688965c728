//! # Storage Layer
//!
//! Persistence for the board.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Board | JSON array of lists | `.board/{storage_key}.json` |
//! | Config | TOML | `.board/config.toml` |
//!
//! The default `storage_key` is `todo-board-lists`.
//!
//! ## Concurrency Safety
//!
//! - [`FileBlobStore`] uses file locking (`fs2`) for concurrent access
//! - All writes are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`Workspace`] - Entry point for a `.board/` directory
//! - [`BoardStore`] - The current board plus persistence after every change
//! - [`BlobStore`] - Key-value slot abstraction ([`FileBlobStore`], [`MemoryBlobStore`])
//! - [`Config`] - Workspace and global configuration

mod blob;
mod codec;
mod config;
mod store;
mod workspace;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use codec::{decode, decode_or_seed, encode, STORAGE_KEY};
pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, WorkspaceConfig, WORKSPACE_DIR};
pub use store::BoardStore;
pub use workspace::{Workspace, WorkspaceError};
