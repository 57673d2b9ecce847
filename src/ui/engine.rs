use cloudsync::{EngineEvent, SyncMode};

pub fn render_header(mode: SyncMode, folder: &str, target: &str, interval_minutes: u64) -> String {
    let schedule = match mode {
        SyncMode::Timer => format!("every {interval_minutes} min"),
        SyncMode::Realtime => "on change".to_string(),
    };
    format!(
        "CloudSync\n  Folder:  {folder}\n  Remote:  {target}\n  Mode:    {mode} ({schedule})\n  Hint:    Press Ctrl+C to stop\n\n"
    )
}

pub fn render_event(timestamp: &str, event: &EngineEvent) -> String {
    let prefix = format!("[{timestamp}]");

    match event {
        EngineEvent::EngineStarted { mode, .. } => match mode {
            SyncMode::Timer => format!("{prefix} [~] Timer sync active\n"),
            SyncMode::Realtime => format!("{prefix} [~] Realtime sync active...\n"),
        },
        EngineEvent::ChangesPending => format!("{prefix} [>] Changes detected\n"),
        EngineEvent::SyncStarted { target } => format!("{prefix} [..] Syncing -> {target}\n"),
        EngineEvent::SyncQueued => format!("{prefix} [+] Sync queued (one already running)\n"),
        EngineEvent::SyncComplete {
            target,
            duration_ms,
        } => format!(
            "{prefix} [ok] Synced {target} in {}\n",
            format_duration(*duration_ms)
        ),
        EngineEvent::SyncFailed { message, .. } => format!("{prefix} [x] {message}\n"),
        EngineEvent::Shutdown { syncs, failures } => format!(
            "\n{prefix} [~] Stopped after {syncs} sync{} ({failures} failed)\n",
            if *syncs == 1 { "" } else { "s" }
        ),
    }
}

fn format_duration(ms: u64) -> String {
    if ms < 1_000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", ms as f64 / 1_000.0)
    }
}
