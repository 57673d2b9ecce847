//! Persisted settings: the sync snapshot plus sync-tool options

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::config::{SyncConfig, SyncMode, DEFAULT_INTERVAL_MINUTES, DEFAULT_REMOTE_NAME};

/// Options passed to the external sync tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Program to run (name on PATH or absolute path)
    pub binary: String,
    pub transfers: u32,
    pub checkers: u32,
    pub fast_list: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            binary: "rclone".to_string(),
            transfers: 2,
            checkers: 2,
            fast_list: true,
        }
    }
}

/// On-disk shape of `config.toml`
///
/// ```toml
/// local_folder = "/home/me/Documents"
/// remote_name = "gdrive"
/// remote_subpath = ""
/// mode = "timer"
/// interval_minutes = 30
///
/// [tool]
/// binary = "rclone"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub local_folder: PathBuf,
    pub remote_name: String,
    pub remote_subpath: String,
    pub mode: SyncMode,
    pub interval_minutes: u64,
    pub tool: ToolConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            local_folder: PathBuf::new(),
            remote_name: DEFAULT_REMOTE_NAME.to_string(),
            remote_subpath: String::new(),
            mode: SyncMode::Timer,
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            tool: ToolConfig::default(),
        }
    }
}

impl Settings {
    /// Snapshot handed to the engine
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            local_folder: self.local_folder.clone(),
            remote_name: self.remote_name.clone(),
            remote_subpath: self.remote_subpath.clone(),
            mode: self.mode,
            interval_minutes: self.interval_minutes,
        }
    }

    /// Overwrite the sync fields, keeping tool options
    pub fn apply(&mut self, config: &SyncConfig) {
        self.local_folder = config.local_folder.clone();
        self.remote_name = config.remote_name.clone();
        self.remote_subpath = config.remote_subpath.clone();
        self.mode = config.mode;
        self.interval_minutes = config.interval_minutes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_default_sync_config() {
        assert_eq!(Settings::default().sync_config(), SyncConfig::default());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str(
            r#"
local_folder = "/srv/share"
mode = "realtime"
"#,
        )
        .unwrap();

        assert_eq!(settings.local_folder, PathBuf::from("/srv/share"));
        assert_eq!(settings.mode, SyncMode::Realtime);
        assert_eq!(settings.remote_name, "gdrive");
        assert_eq!(settings.interval_minutes, 30);
        assert_eq!(settings.tool, ToolConfig::default());
    }

    #[test]
    fn apply_keeps_tool_options() {
        let mut settings = Settings {
            tool: ToolConfig {
                transfers: 8,
                ..ToolConfig::default()
            },
            ..Settings::default()
        };
        settings.apply(&SyncConfig::new("/data", "b2").with_interval_minutes(5));

        assert_eq!(settings.remote_name, "b2");
        assert_eq!(settings.interval_minutes, 5);
        assert_eq!(settings.tool.transfers, 8);
    }
}
