//! Domain layer
//!
//! Configuration snapshot, change events, and the ports the engine talks
//! through. Nothing here performs I/O beyond validating the folder.

pub mod config;
pub mod events;
pub mod ports;

pub use config::{remote_target, SyncConfig, SyncMode};
pub use events::ChangeEvent;
