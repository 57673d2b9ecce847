//! External sync tool port
//!
//! The tool's transfer algorithm, concurrency limits and listing strategy
//! are opaque; the core only needs a success/failure outcome.

use std::path::Path;

use crate::error::ToolFailure;

/// One blocking "sync `source` to `destination`" call.
pub trait SyncTool: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Run the tool once. Must not retry internally.
    fn run(&self, source: &Path, destination: &str) -> Result<(), ToolFailure>;
}

impl<T: SyncTool + ?Sized> SyncTool for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, source: &Path, destination: &str) -> Result<(), ToolFailure> {
        (**self).run(source, destination)
    }
}

impl<T: SyncTool + ?Sized> SyncTool for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn run(&self, source: &Path, destination: &str) -> Result<(), ToolFailure> {
        (**self).run(source, destination)
    }
}
