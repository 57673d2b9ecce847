//! Single sync invocation

use tracing::{debug, info, warn};

use crate::domain::config::SyncConfig;
use crate::domain::ports::SyncTool;
use crate::error::{SyncError, SyncResult};

/// Wraps one blocking call to the external sync tool.
///
/// Serialization of concurrent triggers is the engine's job (see
/// `SyncGate`); the invoker itself just runs the tool once per call.
#[derive(Debug)]
pub struct SyncInvoker<T> {
    tool: T,
}

impl<T: SyncTool> SyncInvoker<T> {
    pub fn new(tool: T) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Sync the configured folder once.
    ///
    /// Fails with `NotConfigured` before touching the tool when no folder
    /// is set.
    pub fn invoke(&self, config: &SyncConfig) -> SyncResult<()> {
        if !config.is_configured() {
            debug!("skipping sync: no folder configured");
            return Err(SyncError::NotConfigured);
        }

        let target = config.remote_target();
        info!(
            tool = self.tool.name(),
            folder = %config.local_folder.display(),
            %target,
            "running sync"
        );

        match self.tool.run(&config.local_folder, &target) {
            Ok(()) => {
                info!(%target, "sync finished");
                Ok(())
            }
            Err(failure) => {
                warn!(%target, error = %failure, "sync tool failed");
                Err(failure.into())
            }
        }
    }
}
