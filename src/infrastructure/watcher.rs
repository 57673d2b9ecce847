//! Filesystem watcher on top of `notify`

use std::path::Path;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{trace, warn};

use crate::domain::events::ChangeEvent;
use crate::domain::ports::{ChangeSink, FilesystemWatchPort, WatchSubscription};
use crate::error::{SyncError, SyncResult};

/// Recursive watch using the platform's recommended backend
#[derive(Debug, Clone, Copy, Default)]
pub struct NotifyWatcher;

impl NotifyWatcher {
    pub fn new() -> Self {
        Self
    }
}

/// Whether an event kind means the tree changed.
///
/// Access events (open/read/close-without-write) are skipped: the sync
/// tool reading the folder would otherwise retrigger itself forever.
pub fn is_change(kind: &EventKind) -> bool {
    !matches!(kind, EventKind::Access(_))
}

impl FilesystemWatchPort for NotifyWatcher {
    fn subscribe(&self, root: &Path, on_change: ChangeSink) -> SyncResult<WatchSubscription> {
        let subscription_error = |e: notify::Error| SyncError::WatchSubscriptionFailed {
            path: root.to_path_buf(),
            message: e.to_string(),
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) if is_change(&event.kind) => {
                    trace!(kind = ?event.kind, paths = ?event.paths, "change");
                    on_change(ChangeEvent::now());
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "watch error"),
            },
            Config::default(),
        )
        .map_err(subscription_error)?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(subscription_error)?;

        Ok(WatchSubscription::new(watcher))
    }
}
