//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the sync core.
//! Infrastructure layer provides concrete implementations.

pub mod config_port;
pub mod sync_tool;
pub mod watch_port;

pub use config_port::ConfigPort;
pub use sync_tool::SyncTool;
pub use watch_port::{ChangeSink, FilesystemWatchPort, WatchSubscription};
