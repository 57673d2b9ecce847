//! TOML configuration store
//!
//! Settings live in `<config_dir>/cloudsync-lite/config.toml`:
//! 1. Environment variables (CLOUDSYNC_*) (highest priority)
//! 2. The saved file
//! 3. Built-in defaults (lowest priority)

mod settings;
mod toml_store;

pub use settings::{Settings, ToolConfig};
pub use toml_store::{apply_env_overrides, ConfigWarning, TomlConfigStore, CONFIG_DIR_ENV};
