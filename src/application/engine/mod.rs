//! Sync Engine
//!
//! Decides *when* a sync runs:
//! - Timer mode: sync immediately, then again `interval` after each sync
//! - Realtime mode: debounce filesystem changes (3s quiet period)
//! - At most one invocation in flight; extra requests queue one follow-up
//! - Graceful shutdown through `EngineHandle`
//!
//! ## Usage
//!
//! ```ignore
//! let engine = SyncEngine::new(config, RcloneTool::new(tool_config));
//! let handle = engine.handle();
//! ctrlc::set_handler(move || { handle.shutdown(); })?;
//! let session = engine.run(&NotifyWatcher::new(), |event| { ... })?;
//! ```

mod controller;
mod event;


pub use controller::{EngineHandle, SyncEngine};
pub use event::{EngineEvent, EngineOptions, EngineState, ModeSession, SyncOutcome};
