//! TOML-based configuration store implementation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::config::SyncConfig;
use crate::domain::ports::ConfigPort;
use crate::error::ConfigError;

use super::settings::Settings;

/// Overrides the configuration directory (tests, portable installs)
pub const CONFIG_DIR_ENV: &str = "CLOUDSYNC_CONFIG_DIR";

const APP_DIR: &str = "cloudsync-lite";
const CONFIG_FILE: &str = "config.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

/// Reads and writes `config.toml` in one directory.
#[derive(Debug, Clone)]
pub struct TomlConfigStore {
    dir: PathBuf,
}

impl TomlConfigStore {
    /// Store in the platform config directory, or `$CLOUDSYNC_CONFIG_DIR`
    pub fn new() -> Result<Self, ConfigError> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_dir(PathBuf::from(dir)));
        }
        dirs::config_dir()
            .map(|base| Self::with_dir(base.join(APP_DIR)))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    /// Saved settings (or defaults) with environment overrides applied
    pub fn load(&self) -> Result<Settings, ConfigError> {
        self.load_with_warnings().map(|(settings, _)| settings)
    }

    /// Load settings and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(&self) -> Result<(Settings, Vec<ConfigWarning>), ConfigError> {
        let (settings, warnings) = self.load_file()?;
        Ok((
            apply_env_overrides(settings, |key| std::env::var(key).ok()),
            warnings,
        ))
    }

    /// Saved settings without environment overrides
    pub fn load_file(&self) -> Result<(Settings, Vec<ConfigWarning>), ConfigError> {
        let path = self.path();
        if !path.exists() {
            debug!(path = %path.display(), "no saved config; using defaults");
            return Ok((Settings::default(), Vec::new()));
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        parse_settings(&content, &path)
    }

    /// Write settings atomically (temp file in the same dir, then rename)
    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: self.path(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let content = toml::to_string_pretty(settings)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(content.as_bytes()).map_err(io_err)?;
        tmp.persist(self.path()).map_err(|e| io_err(e.error))?;

        debug!(path = %self.path().display(), "config saved");
        Ok(())
    }
}

impl ConfigPort for TomlConfigStore {
    fn get(&self) -> SyncConfig {
        match self.load() {
            Ok(settings) => settings.sync_config(),
            Err(e) => {
                warn!(error = %e, "config unusable; falling back to defaults");
                apply_env_overrides(Settings::default(), |key| std::env::var(key).ok())
                    .sync_config()
            }
        }
    }
}

fn parse_settings(content: &str, path: &Path) -> Result<(Settings, Vec<ConfigWarning>), ConfigError> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let settings: Settings = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((settings, warnings))
}

/// Apply CLOUDSYNC_* overrides. Unparseable values are logged and ignored.
pub fn apply_env_overrides(mut settings: Settings, lookup: impl Fn(&str) -> Option<String>) -> Settings {
    if let Some(folder) = lookup("CLOUDSYNC_LOCAL_FOLDER") {
        settings.local_folder = PathBuf::from(folder);
    }
    if let Some(remote) = lookup("CLOUDSYNC_REMOTE_NAME") {
        settings.remote_name = remote;
    }
    if let Some(subpath) = lookup("CLOUDSYNC_REMOTE_SUBPATH") {
        settings.remote_subpath = subpath;
    }
    if let Some(mode) = lookup("CLOUDSYNC_MODE") {
        match mode.parse() {
            Ok(mode) => settings.mode = mode,
            Err(e) => warn!(value = %mode, "ignoring CLOUDSYNC_MODE: {e}"),
        }
    }
    if let Some(minutes) = lookup("CLOUDSYNC_INTERVAL_MINUTES") {
        match minutes.trim().parse::<u64>() {
            Ok(minutes) if minutes > 0 => settings.interval_minutes = minutes,
            _ => warn!(value = %minutes, "ignoring CLOUDSYNC_INTERVAL_MINUTES"),
        }
    }
    if let Some(binary) = lookup("CLOUDSYNC_RCLONE") {
        settings.tool.binary = binary;
    }
    settings
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "local_folder",
        "remote_name",
        "remote_subpath",
        "mode",
        "interval_minutes",
        "tool",
        "binary",
        "transfers",
        "checkers",
        "fast_list",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (*candidate, levenshtein(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
