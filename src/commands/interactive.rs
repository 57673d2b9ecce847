//! Interactive menu

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::{Input, Select};

use cloudsync::{ConfigPort, SyncConfig, SyncMode, TomlConfigStore};

use super::{load_saved, start, sync_now, Interrupts};

pub fn run_menu(store: &TomlConfigStore, interrupts: &Interrupts) -> Result<()> {
    loop {
        let config = store.get();

        println!("=============================");
        println!("      CloudSync Lite");
        println!("=============================");
        if config.is_configured() {
            println!(
                "{} -> {} ({})\n",
                config.local_folder.display(),
                config.remote_target(),
                config.mode
            );
        } else {
            println!("No folder configured yet.\n");
        }

        let items = vec![
            "[1] Configure",
            "[2] Start sync engine",
            "[3] Sync now",
            "[4] Exit",
        ];

        let selection = Select::new()
            .with_prompt("Select")
            .items(&items)
            .default(0)
            .interact()?;

        match selection {
            0 => {
                if let Err(e) = configure(store) {
                    eprintln!("Error: {e:#}\n");
                }
            }
            1 => {
                if let Err(e) = start::cmd_start(store, interrupts, false) {
                    eprintln!("Error: {e:#}\n");
                }
            }
            2 => {
                sync_now::cmd_sync_now(store, false)?;
                println!();
            }
            _ => return Ok(()),
        }
    }
}

/// Menu entries for the mode prompt, in display order
const MODES: [(&str, SyncMode); 2] = [("Timer", SyncMode::Timer), ("Realtime", SyncMode::Realtime)];

/// Turn raw prompt answers into a config snapshot
fn assemble_config(
    folder: &str,
    remote: &str,
    subpath: &str,
    mode: SyncMode,
    interval_minutes: u64,
) -> SyncConfig {
    let folder = PathBuf::from(folder.trim());
    let local_folder = if folder.as_os_str().is_empty() {
        folder
    } else {
        std::path::absolute(&folder).unwrap_or(folder)
    };
    SyncConfig {
        local_folder,
        remote_name: remote.trim().to_string(),
        remote_subpath: subpath.trim().trim_matches('/').to_string(),
        mode,
        interval_minutes,
    }
}

/// Prompt for every setting, prefilled with the saved values
fn configure(store: &TomlConfigStore) -> Result<()> {
    let mut settings = load_saved(store)?;

    let folder: String = Input::new()
        .with_prompt("Folder to sync")
        .with_initial_text(settings.local_folder.display().to_string())
        .interact_text()?;

    let remote: String = Input::new()
        .with_prompt("Rclone remote name")
        .default(settings.remote_name.clone())
        .interact_text()?;

    let subpath: String = Input::new()
        .with_prompt("Remote subfolder (optional)")
        .with_initial_text(settings.remote_subpath.clone())
        .allow_empty(true)
        .interact_text()?;

    let labels: Vec<&str> = MODES.iter().map(|(label, _)| *label).collect();
    let current = MODES
        .iter()
        .position(|(_, mode)| *mode == settings.mode)
        .unwrap_or(0);
    let mode = Select::new()
        .with_prompt("Mode")
        .items(&labels)
        .default(current)
        .interact()?;

    let interval: u64 = Input::new()
        .with_prompt("Interval (minutes)")
        .default(settings.interval_minutes)
        .validate_with(|v: &u64| -> Result<(), &str> {
            if *v > 0 {
                Ok(())
            } else {
                Err("must be at least 1")
            }
        })
        .interact_text()?;

    let config = assemble_config(&folder, &remote, &subpath, MODES[mode].1, interval);
    settings.apply(&config);

    store.save(&settings)?;
    println!("Saved. Restart the sync engine to pick up changes.\n");
    Ok(())
}
