//! Terminal output for the CLI

pub mod engine;

use cloudsync::EngineEvent;

/// Print one engine event, as NDJSON or as a timestamped line
pub fn print_event(command: &str, event: &EngineEvent, json: bool) {
    if json {
        println!("{}", event.to_json(command));
        return;
    }

    let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
    let rendered = engine::render_event(&timestamp, event);
    if event.is_failure() {
        eprint!("{rendered}");
    } else {
        print!("{rendered}");
    }
}
