//! Sync engine (mode controller)
//!
//! Watch callbacks, worker threads and the handle all post messages into a
//! single control loop. Only that loop touches the debouncer and the gate,
//! so the at-most-one-invocation and restart-on-change rules live in one
//! place.

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::application::debounce::Debouncer;
use crate::application::gate::{GateDecision, SyncGate};
use crate::application::invoker::SyncInvoker;
use crate::domain::config::{SyncConfig, SyncMode};
use crate::domain::events::ChangeEvent;
use crate::domain::ports::{FilesystemWatchPort, SyncTool, WatchSubscription};
use crate::error::{SyncError, SyncResult};

use super::event::{EngineEvent, EngineOptions, EngineState, ModeSession};

/// Messages accepted by the control loop
#[derive(Debug)]
enum EngineMessage {
    /// Sync request that bypasses debouncing
    Tick,
    ChangeDetected(ChangeEvent),
    SyncCompleted {
        result: SyncResult<()>,
        elapsed: Duration,
    },
    Shutdown,
}

/// Cloneable, thread-safe control handle for a running engine
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: Sender<EngineMessage>,
    state: Arc<Mutex<EngineState>>,
}

impl EngineHandle {
    /// Ask the loop to stop. An in-flight sync is allowed to finish first.
    pub fn shutdown(&self) -> bool {
        self.tx.send(EngineMessage::Shutdown).is_ok()
    }

    /// Request an immediate sync (still subject to at-most-one)
    pub fn request_sync(&self) -> bool {
        self.tx.send(EngineMessage::Tick).is_ok()
    }

    /// Feed a change notification into the loop as if the watcher sent it
    pub fn notify_change(&self, event: ChangeEvent) -> bool {
        self.tx.send(EngineMessage::ChangeDetected(event)).is_ok()
    }

    pub fn state(&self) -> EngineState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Owns one configuration snapshot and drives either the timer loop or
/// the realtime loop for it.
pub struct SyncEngine<T> {
    config: SyncConfig,
    invoker: Arc<SyncInvoker<T>>,
    options: EngineOptions,
    tx: Sender<EngineMessage>,
    rx: Receiver<EngineMessage>,
    state: Arc<Mutex<EngineState>>,
}

impl<T: SyncTool + 'static> SyncEngine<T> {
    /// Create an engine in the `Idle` state. The mode is taken from this
    /// snapshot; later config edits need a restart.
    pub fn new(config: SyncConfig, tool: T) -> Self {
        let (tx, rx) = channel();
        let options = EngineOptions::for_config(&config);
        Self {
            config,
            invoker: Arc::new(SyncInvoker::new(tool)),
            options,
            tx,
            rx,
            state: Arc::new(Mutex::new(EngineState::Idle)),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            tx: self.tx.clone(),
            state: Arc::clone(&self.state),
        }
    }

    pub fn state(&self) -> EngineState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run until `EngineHandle::shutdown` is called (blocking).
    ///
    /// Fails before entering the loop when the folder is not configured or
    /// missing, the timer interval is zero, or (realtime) the watch cannot
    /// be set up. Individual sync failures are reported through `on_event`
    /// and never end the loop.
    pub fn run<W, F>(self, watcher: &W, on_event: F) -> SyncResult<ModeSession>
    where
        W: FilesystemWatchPort + ?Sized,
        F: Fn(EngineEvent),
    {
        self.config.validate()?;
        let mode = self.config.mode;

        // Held for the lifetime of the loop
        let _subscription = match mode {
            SyncMode::Realtime => Some(self.subscribe(watcher)?),
            SyncMode::Timer => None,
        };

        self.set_state(EngineState::running(mode));
        info!(%mode, folder = %self.config.local_folder.display(), "sync engine started");
        on_event(EngineEvent::EngineStarted {
            mode,
            folder: self.config.local_folder.display().to_string(),
            target: self.config.remote_target(),
            interval_secs: (mode == SyncMode::Timer).then(|| self.options.interval.as_secs()),
        });

        let mut session = ModeSession::start(mode);
        self.control_loop(&mut session, &on_event);

        self.set_state(EngineState::Stopped);
        info!(
            syncs = session.syncs,
            failures = session.failures,
            "sync engine stopped"
        );
        on_event(EngineEvent::Shutdown {
            syncs: session.syncs,
            failures: session.failures,
        });
        Ok(session)
    }

    fn subscribe<W>(&self, watcher: &W) -> SyncResult<WatchSubscription>
    where
        W: FilesystemWatchPort + ?Sized,
    {
        let tx = self.tx.clone();
        watcher.subscribe(
            &self.config.local_folder,
            Box::new(move |event| {
                let _ = tx.send(EngineMessage::ChangeDetected(event));
            }),
        )
    }

    fn control_loop<F: Fn(EngineEvent)>(&self, session: &mut ModeSession, on_event: &F) {
        let mode = self.config.mode;
        let mut debouncer = Debouncer::new(self.options.quiet_period);
        let mut gate = SyncGate::new();
        // Timer mode syncs immediately, then sleeps `interval` after each sync
        let mut next_tick = (mode == SyncMode::Timer).then(Instant::now);

        loop {
            let now = Instant::now();
            if next_tick.is_some_and(|at| now >= at) {
                next_tick = None;
                self.request(&mut gate, on_event);
            }
            if debouncer.poll(now) {
                debug!("changes settled");
                self.request(&mut gate, on_event);
            }

            let wake_at = match (next_tick, debouncer.deadline()) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
            let message = match wake_at {
                Some(at) => match self.rx.recv_timeout(at.saturating_duration_since(now)) {
                    Ok(message) => message,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                },
                None => match self.rx.recv() {
                    Ok(message) => message,
                    Err(_) => break,
                },
            };

            match message {
                EngineMessage::Tick => self.request(&mut gate, on_event),
                EngineMessage::ChangeDetected(event) => {
                    if debouncer.on_change(event.at) {
                        debug!("change burst started");
                        on_event(EngineEvent::ChangesPending);
                    }
                }
                EngineMessage::SyncCompleted { result, elapsed } => {
                    self.record(result, elapsed, session, on_event);
                    if gate.complete() {
                        self.launch(on_event);
                    } else if mode == SyncMode::Timer {
                        next_tick = Instant::now().checked_add(self.options.interval);
                        if next_tick.is_none() {
                            // Past the clock's range: only request_sync or
                            // shutdown can wake the loop now
                            warn!(
                                interval_secs = self.options.interval.as_secs(),
                                "interval too long to schedule; no further ticks"
                            );
                        }
                    }
                }
                EngineMessage::Shutdown => {
                    debug!("shutdown requested");
                    break;
                }
            }
        }

        if debouncer.cancel() {
            debug!("dropping pending change burst");
        }
        if gate.clear_queue() {
            debug!("dropping queued sync");
        }
        while gate.is_running() {
            match self.rx.recv() {
                Ok(EngineMessage::SyncCompleted { result, elapsed }) => {
                    self.record(result, elapsed, session, on_event);
                    gate.complete();
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    }

    fn request<F: Fn(EngineEvent)>(&self, gate: &mut SyncGate, on_event: &F) {
        match gate.request() {
            GateDecision::Launch => self.launch(on_event),
            GateDecision::Queued => {
                debug!("sync already running; queued one more");
                on_event(EngineEvent::SyncQueued);
            }
        }
    }

    fn launch<F: Fn(EngineEvent)>(&self, on_event: &F) {
        on_event(EngineEvent::SyncStarted {
            target: self.config.remote_target(),
        });

        let invoker = Arc::clone(&self.invoker);
        let config = self.config.clone();
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name("cloudsync-invoke".to_string())
            .spawn(move || {
                let started = Instant::now();
                let result = invoker.invoke(&config);
                let _ = tx.send(EngineMessage::SyncCompleted {
                    result,
                    elapsed: started.elapsed(),
                });
            });

        if let Err(e) = spawned {
            warn!(error = %e, "could not start sync worker");
            let _ = self.tx.send(EngineMessage::SyncCompleted {
                result: Err(SyncError::Io(e)),
                elapsed: Duration::ZERO,
            });
        }
    }

    fn record<F: Fn(EngineEvent)>(
        &self,
        result: SyncResult<()>,
        elapsed: Duration,
        session: &mut ModeSession,
        on_event: &F,
    ) {
        let target = self.config.remote_target();
        match result {
            Ok(()) => {
                session.record_success();
                on_event(EngineEvent::SyncComplete {
                    target,
                    duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                });
            }
            Err(e) => {
                if e.is_transient() {
                    warn!(error = %e, "sync attempt failed; engine keeps running");
                } else {
                    error!(error = %e, "sync attempt failed");
                }
                session.record_failure(&e);
                on_event(EngineEvent::SyncFailed {
                    target,
                    message: e.to_string(),
                });
            }
        }
    }

    fn set_state(&self, state: EngineState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }
}
