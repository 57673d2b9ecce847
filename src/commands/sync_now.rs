use std::time::Instant;

use anyhow::Result;

use cloudsync::{sync_now, EngineEvent, LockedTool, RcloneTool, TomlConfigStore};

use super::load_settings;
use crate::ui;

/// Sync once. Returns `false` when the sync failed (already reported).
pub fn cmd_sync_now(store: &TomlConfigStore, json: bool) -> Result<bool> {
    let settings = load_settings(store)?;
    let config = settings.sync_config();
    let target = config.remote_target();
    let tool = LockedTool::new(
        RcloneTool::new(settings.tool.clone()).with_quiet(json),
        store.dir(),
    );

    if config.is_configured() {
        ui::print_event(
            "sync_now",
            &EngineEvent::SyncStarted {
                target: target.clone(),
            },
            json,
        );
    }

    let started = Instant::now();
    let event = match sync_now(&config, tool) {
        Ok(()) => EngineEvent::SyncComplete {
            target,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        },
        Err(e) => EngineEvent::SyncFailed {
            target,
            message: e.to_string(),
        },
    };
    ui::print_event("sync_now", &event, json);

    Ok(!event.is_failure())
}
