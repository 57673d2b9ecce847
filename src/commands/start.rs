use anyhow::Result;

use cloudsync::{LockedTool, NotifyWatcher, RcloneTool, SyncEngine, TomlConfigStore};

use super::{load_settings, Interrupts};
use crate::ui;

/// Run the engine for the saved config until Ctrl+C
pub fn cmd_start(store: &TomlConfigStore, interrupts: &Interrupts, json: bool) -> Result<()> {
    let settings = load_settings(store)?;
    let config = settings.sync_config();
    config.validate()?;

    let rclone = RcloneTool::new(settings.tool.clone()).with_quiet(json);
    if !rclone.check_available() {
        eprintln!(
            "warning: '{}' not found or not runnable; syncs will fail until it is installed",
            rclone.program()
        );
    }

    let engine = SyncEngine::new(config, LockedTool::new(rclone, store.dir()));
    if !json {
        let config = engine.config();
        print!(
            "{}",
            ui::engine::render_header(
                config.mode,
                &config.local_folder.display().to_string(),
                &config.remote_target(),
                config.interval_minutes,
            )
        );
    }

    interrupts.arm(engine.handle());
    let result = engine.run(&NotifyWatcher::new(), |event| {
        ui::print_event("start", &event, json)
    });
    interrupts.disarm();

    let session = result?;
    tracing::debug!(
        started_at = %session.started_at,
        syncs = session.syncs,
        failures = session.failures,
        "session finished"
    );
    Ok(())
}
