//! Engine events, options and session state

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::debounce::QUIET_PERIOD;
use crate::domain::config::{SyncConfig, SyncMode};
use crate::error::SyncError;

/// Engine tuning that is not part of the user's configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Debounce quiet period (realtime mode)
    pub quiet_period: Duration,
    /// Sleep between syncs (timer mode)
    pub interval: Duration,
}

impl EngineOptions {
    /// Options derived from a config snapshot: `interval_minutes * 60` seconds
    pub fn for_config(config: &SyncConfig) -> Self {
        Self {
            quiet_period: QUIET_PERIOD,
            interval: Duration::from_secs(config.interval_minutes.saturating_mul(60)),
        }
    }

    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Mode state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Idle,
    RunningTimer,
    RunningRealtime,
    /// Left the run loop after a shutdown request
    Stopped,
}

impl EngineState {
    pub fn running(mode: SyncMode) -> Self {
        match mode {
            SyncMode::Timer => EngineState::RunningTimer,
            SyncMode::Realtime => EngineState::RunningRealtime,
        }
    }
}

/// Engine event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// Loop entered
    EngineStarted {
        mode: SyncMode,
        folder: String,
        target: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        interval_secs: Option<u64>,
    },
    /// First change of a new burst seen; a sync will follow once it settles
    ChangesPending,
    /// Invocation launched
    SyncStarted { target: String },
    /// Request arrived while a sync was running; it will run afterwards
    SyncQueued,
    /// Invocation succeeded
    SyncComplete { target: String, duration_ms: u64 },
    /// Invocation failed
    SyncFailed { target: String, message: String },
    /// Loop exited
    Shutdown { syncs: u64, failures: u64 },
}

impl EngineEvent {
    /// Convert to JSON string with "command" field included
    pub fn to_json(&self, command: &str) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!(command));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, EngineEvent::SyncFailed { .. })
    }
}

/// Outcome of the most recent invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    Success { at: DateTime<Utc> },
    Failed { at: DateTime<Utc>, message: String },
}

/// Live state of a running loop; returned when the loop stops
#[derive(Debug, Clone, Serialize)]
pub struct ModeSession {
    pub mode: SyncMode,
    pub started_at: DateTime<Utc>,
    pub last_result: Option<SyncOutcome>,
    pub syncs: u64,
    pub failures: u64,
}

impl ModeSession {
    pub fn start(mode: SyncMode) -> Self {
        Self {
            mode,
            started_at: Utc::now(),
            last_result: None,
            syncs: 0,
            failures: 0,
        }
    }

    pub fn record_success(&mut self) {
        self.syncs += 1;
        self.last_result = Some(SyncOutcome::Success { at: Utc::now() });
    }

    pub fn record_failure(&mut self, error: &SyncError) {
        self.syncs += 1;
        self.failures += 1;
        self.last_result = Some(SyncOutcome::Failed {
            at: Utc::now(),
            message: error.to_string(),
        });
    }
}
