//! CLI commands

pub mod config;
pub mod interactive;
pub mod start;
pub mod sync_now;

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use cloudsync::{EngineHandle, Settings, TomlConfigStore};

/// Load settings, printing unknown-key warnings to stderr
pub fn load_settings(store: &TomlConfigStore) -> Result<Settings> {
    let (settings, warnings) = store
        .load_with_warnings()
        .with_context(|| format!("failed to load {}", store.path().display()))?;
    for warning in &warnings {
        eprintln!("warning: {warning}");
    }
    Ok(settings)
}

/// Saved settings for editing, without env overrides.
///
/// An unreadable or corrupt file is an error: saving over it would lose
/// whatever the user had in it.
pub fn load_saved(store: &TomlConfigStore) -> Result<Settings> {
    let (settings, _) = store
        .load_file()
        .with_context(|| format!("failed to load {}", store.path().display()))?;
    Ok(settings)
}

/// Routes Ctrl+C to whichever engine is running.
///
/// The handler can only be installed once per process, while the menu may
/// start several engines in turn. With no engine armed, Ctrl+C exits.
#[derive(Clone)]
pub struct Interrupts {
    armed: Arc<Mutex<Option<EngineHandle>>>,
}

impl Interrupts {
    pub fn install() -> Result<Self> {
        let armed: Arc<Mutex<Option<EngineHandle>>> = Arc::new(Mutex::new(None));
        let armed_clone = Arc::clone(&armed);

        ctrlc::set_handler(move || {
            let handle = armed_clone
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone();
            match handle {
                Some(handle) => {
                    handle.shutdown();
                }
                None => std::process::exit(130),
            }
        })
        .context("failed to install Ctrl+C handler")?;

        Ok(Self { armed })
    }

    pub fn arm(&self, handle: EngineHandle) {
        *self.armed.lock().unwrap_or_else(|e| e.into_inner()) = Some(handle);
    }

    pub fn disarm(&self) {
        *self.armed.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_saved_refuses_corrupt_file() {
        let dir = tempdir().unwrap();
        let store = TomlConfigStore::with_dir(dir.path());
        let corrupt = "local_folder = \"/data\"\n[tool\nbinary = \"/opt/rclone\"\n";
        std::fs::write(store.path(), corrupt).unwrap();

        let err = load_saved(&store).unwrap_err();

        assert!(format!("{err:#}").contains("failed to load"));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), corrupt);
    }

    #[test]
    fn load_saved_reads_file_values() {
        let dir = tempdir().unwrap();
        let store = TomlConfigStore::with_dir(dir.path());
        std::fs::write(store.path(), "remote_name = \"b2\"\n").unwrap();

        let settings = load_saved(&store).unwrap();
        assert_eq!(settings.remote_name, "b2");
    }

    #[test]
    fn load_saved_without_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = TomlConfigStore::with_dir(dir.path());

        assert_eq!(load_saved(&store).unwrap(), Settings::default());
        assert!(!store.path().exists());
    }
}
