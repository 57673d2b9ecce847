//! CloudSync - folder sync trigger
//!
//! CloudSync decides *when* a local folder is synced to a remote and hands
//! the actual transfer to an external tool (rclone). It runs either on a
//! fixed timer or in realtime, debouncing filesystem changes into single
//! sync invocations, never more than one at a time.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    sync_now, Debouncer, EngineEvent, EngineHandle, EngineOptions, EngineState, ModeSession,
    SyncEngine, SyncGate, SyncInvoker,
};
pub use domain::ports::{ConfigPort, FilesystemWatchPort, SyncTool};
pub use domain::{remote_target, ChangeEvent, SyncConfig, SyncMode};
pub use error::{ConfigError, SyncError, SyncResult, ToolFailure};
pub use infrastructure::{LockedTool, NotifyWatcher, RcloneTool, Settings, TomlConfigStore, ToolConfig};
