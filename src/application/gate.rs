//! At-most-one invocation gate
//!
//! Owned by the engine's control loop, which is the only place that reads
//! or writes it; the loop's message queue is the mutual-exclusion
//! discipline, so no lock is needed.

/// What to do with a sync request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Nothing is running: start an invocation now
    Launch,
    /// An invocation is in flight: run once more after it completes
    Queued,
}

/// The "sync running" and "sync queued" flags
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncGate {
    running: bool,
    queued: bool,
}

impl SyncGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a request. Requests made while one is queued collapse into
    /// that single follow-up.
    pub fn request(&mut self) -> GateDecision {
        if self.running {
            self.queued = true;
            GateDecision::Queued
        } else {
            self.running = true;
            GateDecision::Launch
        }
    }

    /// Mark the in-flight invocation finished. Returns `true` when a
    /// queued request should be launched right away (the gate stays
    /// closed for it).
    pub fn complete(&mut self) -> bool {
        debug_assert!(self.running, "complete() without a running sync");
        if self.queued {
            self.queued = false;
            true
        } else {
            self.running = false;
            false
        }
    }

    /// Drop a pending follow-up (used on shutdown)
    pub fn clear_queue(&mut self) -> bool {
        std::mem::take(&mut self.queued)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_queued(&self) -> bool {
        self.queued
    }
}
