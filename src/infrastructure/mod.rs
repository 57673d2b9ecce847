//! Infrastructure Layer
//!
//! Concrete implementations of the domain ports:
//! - `TomlConfigStore` - ConfigPort backed by `config.toml`
//! - `NotifyWatcher` - FilesystemWatchPort backed by `notify`
//! - `RcloneTool` - SyncTool that spawns `rclone sync`
//! - `LockedTool` - serializes runs on a folder across processes

pub mod config;
pub mod lock;
pub mod rclone;
pub mod watcher;

pub use config::{Settings, TomlConfigStore, ToolConfig};
pub use lock::{FolderLock, LockedTool};
pub use rclone::RcloneTool;
pub use watcher::NotifyWatcher;
