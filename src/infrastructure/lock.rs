//! Per-folder invocation lock
//!
//! The engine already keeps its own invocations serial. This lock covers
//! separate processes (`sync-now` while an engine runs) pointed at the
//! same folder: the second one waits for the first.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::domain::ports::SyncTool;
use crate::error::ToolFailure;

/// Exclusive advisory lock, released on drop
#[derive(Debug)]
pub struct FolderLock {
    file: File,
    path: PathBuf,
}

impl FolderLock {
    /// Block until the lock for `folder` is ours
    pub fn acquire(lock_dir: &Path, folder: &Path) -> std::io::Result<Self> {
        fs::create_dir_all(lock_dir)?;
        let path = lock_dir.join(lock_file_name(folder));
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;

        if file.try_lock_exclusive().is_err() {
            debug!(lock = %path.display(), "another sync holds the folder lock; waiting");
            file.lock_exclusive()?;
        }
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FolderLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// `/home/me/My Docs` -> `home_me_My_Docs.lock`
pub fn lock_file_name(folder: &Path) -> String {
    let raw = folder.to_string_lossy();
    let name: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    match name.trim_matches('_') {
        "" => "root.lock".to_string(),
        name => format!("{name}.lock"),
    }
}

/// Wraps a tool so each run holds the folder lock
#[derive(Debug, Clone)]
pub struct LockedTool<T> {
    inner: T,
    lock_dir: PathBuf,
}

impl<T: SyncTool> LockedTool<T> {
    pub fn new(inner: T, lock_dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            lock_dir: lock_dir.into(),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: SyncTool> SyncTool for LockedTool<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn run(&self, source: &Path, destination: &str) -> Result<(), ToolFailure> {
        let _lock = FolderLock::acquire(&self.lock_dir, source).map_err(|e| ToolFailure::Lock {
            path: self.lock_dir.join(lock_file_name(source)),
            message: e.to_string(),
        })?;
        self.inner.run(source, destination)
    }
}
