//! Filesystem watch port

use std::path::Path;

use crate::domain::events::ChangeEvent;
use crate::error::SyncResult;

/// Callback invoked (from the watcher's own thread) for every change.
pub type ChangeSink = Box<dyn Fn(ChangeEvent) + Send + 'static>;

/// Keeps a recursive watch alive; dropping it ends the subscription.
pub struct WatchSubscription {
    _guard: Box<dyn Send>,
}

impl WatchSubscription {
    pub fn new<G: Send + 'static>(guard: G) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

impl std::fmt::Debug for WatchSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchSubscription").finish_non_exhaustive()
    }
}

/// Supplies change notifications for a directory tree.
///
/// Implementations must report any kind of change (create, modify, delete,
/// rename) and fail with `SyncError::WatchSubscriptionFailed` rather than
/// returning a subscription that never fires.
pub trait FilesystemWatchPort {
    fn subscribe(&self, root: &Path, on_change: ChangeSink) -> SyncResult<WatchSubscription>;
}
