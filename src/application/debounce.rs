//! Debouncing of change bursts
//!
//! Time is passed in explicitly so the engine drives it from its run loop
//! and tests can use synthetic instants.

use std::time::{Duration, Instant};

/// Quiet period a burst must settle for before a sync fires
pub const QUIET_PERIOD: Duration = Duration::from_secs(3);

/// Per-burst state: exists from the first change after quiescence until
/// the countdown fires or is cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceWindow {
    pub pending_trigger: bool,
    pub deadline: Instant,
}

/// Collapses a burst of changes into one trigger, `quiet_period` after
/// the last change.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet_period: Duration,
    window: Option<DebounceWindow>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(QUIET_PERIOD)
    }
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            window: None,
        }
    }

    /// Record a change at `at`, restarting the countdown.
    ///
    /// Returns `true` when this change opened a new window.
    pub fn on_change(&mut self, at: Instant) -> bool {
        let deadline = at + self.quiet_period;
        match self.window.as_mut() {
            Some(window) => {
                // Events may be stamped on another thread; never move the
                // deadline backwards.
                if deadline > window.deadline {
                    window.deadline = deadline;
                }
                false
            }
            None => {
                self.window = Some(DebounceWindow {
                    pending_trigger: true,
                    deadline,
                });
                true
            }
        }
    }

    /// When the pending countdown elapses, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.window.map(|w| w.deadline)
    }

    /// Fire if the countdown has elapsed by `now`. Firing destroys the
    /// window, so each burst yields exactly one `true`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.window {
            Some(window) if window.pending_trigger && now >= window.deadline => {
                self.window = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending countdown without firing
    pub fn cancel(&mut self) -> bool {
        self.window.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn no_changes_never_fires() {
        let mut debouncer = Debouncer::new(secs(3));
        let t0 = Instant::now();
        assert!(!debouncer.poll(t0 + secs(100)));
        assert_eq!(debouncer.deadline(), None);
    }

    #[test]
    fn burst_fires_once_after_last_change() {
        let mut debouncer = Debouncer::new(secs(3));
        let t0 = Instant::now();

        assert!(debouncer.on_change(t0));
        assert!(!debouncer.on_change(t0 + secs(1)));
        assert!(!debouncer.on_change(t0 + secs(2)));

        assert!(!debouncer.poll(t0 + secs(3)));
        assert!(!debouncer.poll(t0 + secs(4)));
        assert_eq!(debouncer.deadline(), Some(t0 + secs(5)));
        assert!(debouncer.poll(t0 + secs(5)));

        // Window is gone; nothing more fires
        assert!(!debouncer.poll(t0 + secs(9)));
    }

    #[test]
    fn late_stamped_event_does_not_shorten_window() {
        let mut debouncer = Debouncer::new(secs(3));
        let t0 = Instant::now();

        debouncer.on_change(t0 + secs(2));
        debouncer.on_change(t0);

        assert_eq!(debouncer.deadline(), Some(t0 + secs(5)));
    }

    #[test]
    fn change_after_fire_opens_new_window() {
        let mut debouncer = Debouncer::new(secs(3));
        let t0 = Instant::now();

        debouncer.on_change(t0);
        assert!(debouncer.poll(t0 + secs(3)));
        assert!(debouncer.on_change(t0 + secs(10)));
        assert!(!debouncer.poll(t0 + secs(12)));
        assert!(debouncer.poll(t0 + secs(13)));
    }

    #[test]
    fn cancel_discards_pending_trigger() {
        let mut debouncer = Debouncer::default();
        let t0 = Instant::now();

        debouncer.on_change(t0);
        assert!(debouncer.cancel());
        assert!(!debouncer.poll(t0 + QUIET_PERIOD));
        assert!(!debouncer.cancel());
    }
}
