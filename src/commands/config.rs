use std::path::PathBuf;

use anyhow::Result;

use cloudsync::{SyncMode, TomlConfigStore};

use super::{load_saved, load_settings};
use crate::cli::ConfigAction;

pub fn cmd_config(store: &TomlConfigStore, action: ConfigAction, json: bool) -> Result<()> {
    match action {
        ConfigAction::Show => show(store, json),
        ConfigAction::Path => {
            println!("{}", store.path().display());
            Ok(())
        }
        ConfigAction::Set {
            folder,
            remote,
            subpath,
            mode,
            interval,
        } => set(store, folder, remote, subpath, mode, interval),
    }
}

fn show(store: &TomlConfigStore, json: bool) -> Result<()> {
    let settings = load_settings(store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    println!("# {}", store.path().display());
    if settings.sync_config().is_configured() {
        println!("# remote target: {}", settings.sync_config().remote_target());
    } else {
        println!("# no folder configured yet");
    }
    print!("{}", toml::to_string_pretty(&settings)?);
    Ok(())
}

fn set(
    store: &TomlConfigStore,
    folder: Option<PathBuf>,
    remote: Option<String>,
    subpath: Option<String>,
    mode: Option<SyncMode>,
    interval: Option<u64>,
) -> Result<()> {
    // Edit the saved file only; env overrides must not get persisted
    let mut settings = load_saved(store)?;

    if let Some(folder) = folder {
        let folder = std::path::absolute(&folder).unwrap_or(folder);
        if !folder.is_dir() {
            eprintln!("warning: {} is not an existing directory", folder.display());
        }
        settings.local_folder = folder;
    }
    if let Some(remote) = remote {
        settings.remote_name = remote;
    }
    if let Some(subpath) = subpath {
        settings.remote_subpath = subpath;
    }
    if let Some(mode) = mode {
        settings.mode = mode;
    }
    if let Some(interval) = interval {
        settings.interval_minutes = interval;
    }

    store.save(&settings)?;
    println!("Saved {}", store.path().display());
    Ok(())
}
