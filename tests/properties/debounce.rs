//! Property tests for debounce coalescing.

use std::time::{Duration, Instant};

use proptest::prelude::*;

use cloudsync::Debouncer;

const QUIET_MS: u64 = 3_000;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a burst whose gaps are all shorter than the quiet period
    /// fires exactly once, exactly `quiet` after the last event.
    #[test]
    fn property_burst_fires_once_after_last_event(
        gaps in proptest::collection::vec(0..QUIET_MS, 0..32),
    ) {
        let base = Instant::now();
        let quiet = Duration::from_millis(QUIET_MS);
        let mut debouncer = Debouncer::new(quiet);

        let mut t = 0u64;
        prop_assert!(debouncer.on_change(base));
        for gap in &gaps {
            t += gap;
            let at = base + Duration::from_millis(t);
            prop_assert!(!debouncer.poll(at), "fired mid-burst at {}ms", t);
            prop_assert!(!debouncer.on_change(at), "burst split at {}ms", t);
        }

        let last = base + Duration::from_millis(t);
        prop_assert_eq!(debouncer.deadline(), Some(last + quiet));
        prop_assert!(!debouncer.poll(last + quiet - Duration::from_millis(1)));
        prop_assert!(debouncer.poll(last + quiet));
        prop_assert!(!debouncer.poll(last + quiet * 10));
    }

    /// PROPERTY: gaps of at least the quiet period split events into
    /// separate bursts, one fire each.
    #[test]
    fn property_separated_events_fire_separately(
        gaps in proptest::collection::vec(QUIET_MS..QUIET_MS * 4, 1..16),
    ) {
        let base = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(QUIET_MS));

        let mut fires = 0;
        let mut t = 0u64;
        debouncer.on_change(base);
        for gap in &gaps {
            t += gap;
            let at = base + Duration::from_millis(t);
            if debouncer.poll(at) {
                fires += 1;
            }
            prop_assert!(debouncer.on_change(at));
        }
        if debouncer.poll(base + Duration::from_millis(t + QUIET_MS)) {
            fires += 1;
        }

        prop_assert_eq!(fires, gaps.len() + 1);
    }
}
