//! Sync configuration snapshot
//!
//! A `SyncConfig` is handed to the engine once at start and never mutated
//! while a loop is running.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

pub const DEFAULT_REMOTE_NAME: &str = "gdrive";
pub const DEFAULT_INTERVAL_MINUTES: u64 = 30;

/// Operating strategy, selected once per engine start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Sync on a fixed interval
    #[default]
    Timer,
    /// Sync after filesystem changes settle
    Realtime,
}

impl SyncMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMode::Timer => "timer",
            SyncMode::Realtime => "realtime",
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "timer" => Ok(SyncMode::Timer),
            "realtime" | "real-time" => Ok(SyncMode::Realtime),
            other => Err(format!("unknown mode '{other}' (expected timer or realtime)")),
        }
    }
}

/// What to sync, where to, and how often
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub local_folder: PathBuf,
    pub remote_name: String,
    /// Empty means "use the folder's base name"
    pub remote_subpath: String,
    pub mode: SyncMode,
    pub interval_minutes: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            local_folder: PathBuf::new(),
            remote_name: DEFAULT_REMOTE_NAME.to_string(),
            remote_subpath: String::new(),
            mode: SyncMode::Timer,
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
        }
    }
}

impl SyncConfig {
    pub fn new(local_folder: impl Into<PathBuf>, remote_name: impl Into<String>) -> Self {
        Self {
            local_folder: local_folder.into(),
            remote_name: remote_name.into(),
            ..Self::default()
        }
    }

    pub fn with_subpath(mut self, subpath: impl Into<String>) -> Self {
        self.remote_subpath = subpath.into();
        self
    }

    pub fn with_mode(mut self, mode: SyncMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_interval_minutes(mut self, minutes: u64) -> Self {
        self.interval_minutes = minutes;
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.local_folder.as_os_str().is_empty()
    }

    /// Fully-qualified destination passed to the sync tool (`remote:subpath`)
    pub fn remote_target(&self) -> String {
        remote_target(&self.remote_name, &self.remote_subpath, &self.local_folder)
    }

    /// Check the invariants that must hold before a loop starts
    pub fn validate(&self) -> SyncResult<()> {
        if !self.is_configured() {
            return Err(SyncError::NotConfigured);
        }
        if !self.local_folder.is_dir() {
            return Err(SyncError::FolderNotFound {
                path: self.local_folder.clone(),
            });
        }
        if self.mode == SyncMode::Timer && self.interval_minutes == 0 {
            return Err(SyncError::InvalidInterval {
                minutes: self.interval_minutes,
            });
        }
        Ok(())
    }
}

/// Derive `remote:subpath`, defaulting the subpath to the folder's base name
pub fn remote_target(remote_name: &str, remote_subpath: &str, local_folder: &Path) -> String {
    if !remote_subpath.is_empty() {
        return format!("{remote_name}:{remote_subpath}");
    }
    format!("{remote_name}:{}", folder_base_name(local_folder))
}

fn folder_base_name(folder: &Path) -> String {
    let absolute = if folder.is_absolute() {
        folder.to_path_buf()
    } else {
        std::path::absolute(folder).unwrap_or_else(|_| folder.to_path_buf())
    };
    normalize(&absolute)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// `a/b/..` should name `a`, matching how a shell would resolve the folder.
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
