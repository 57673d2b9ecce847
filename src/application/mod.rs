//! Application layer
//!
//! The sync-trigger core: one-shot invocation, debouncing, the
//! at-most-one gate and the mode-controlling engine.

pub mod debounce;
pub mod engine;
pub mod gate;
pub mod invoker;

pub use debounce::{DebounceWindow, Debouncer, QUIET_PERIOD};
pub use engine::{EngineEvent, EngineHandle, EngineOptions, EngineState, ModeSession, SyncEngine};
pub use gate::{GateDecision, SyncGate};
pub use invoker::SyncInvoker;

use crate::domain::config::SyncConfig;
use crate::domain::ports::SyncTool;
use crate::error::SyncResult;

/// Run one sync right now, outside any engine loop
pub fn sync_now<T: SyncTool>(config: &SyncConfig, tool: T) -> SyncResult<()> {
    SyncInvoker::new(tool).invoke(config)
}
