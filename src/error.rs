//! Error types for CloudSync
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Why the external sync tool did not report success.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolFailure {
    /// The tool binary could not be started at all
    #[error("failed to launch '{program}': {message}")]
    Spawn { program: String, message: String },

    /// The tool ran and exited unsuccessfully
    #[error("'{program}' exited with {}", exit_label(.code))]
    Exit { program: String, code: Option<i32> },

    /// The per-folder lock could not be taken
    #[error("could not lock {path}: {message}")]
    Lock { path: PathBuf, message: String },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Errors raised while triggering or running a sync
#[derive(Error, Debug)]
pub enum SyncError {
    /// No local folder has been configured
    #[error("no folder configured - run `cloudsync config set --folder <PATH>` first")]
    NotConfigured,

    /// The configured folder does not exist or is not a directory
    #[error("folder not found: {path}")]
    FolderNotFound { path: PathBuf },

    /// Timer mode needs a positive interval
    #[error("invalid sync interval: {minutes} minutes (must be greater than 0)")]
    InvalidInterval { minutes: u64 },

    /// The external sync tool reported failure
    #[error("sync failed: {0}")]
    ExternalToolFailed(#[from] ToolFailure),

    /// Could not subscribe to filesystem changes for the folder
    #[error("cannot watch {path}: {message}")]
    WatchSubscriptionFailed { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// Whether a running engine keeps going after this error
    pub fn is_transient(&self) -> bool {
        matches!(self, SyncError::ExternalToolFailed(_) | SyncError::Io(_))
    }
}

/// Errors raised while loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {file}: {message}")]
    Parse { file: PathBuf, message: String },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("could not determine a configuration directory (set CLOUDSYNC_CONFIG_DIR)")]
    NoConfigDir,
}
