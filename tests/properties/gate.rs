//! Property tests for the at-most-one invocation gate.

use proptest::prelude::*;

use cloudsync::application::GateDecision;
use cloudsync::SyncGate;

#[derive(Debug, Clone, Copy)]
enum Op {
    Request,
    Complete,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Request), Just(Op::Complete)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: never more than one invocation in flight, and a request
    /// made while one runs is never lost.
    #[test]
    fn property_gate_serializes_without_loss(ops in proptest::collection::vec(op(), 0..64)) {
        let mut gate = SyncGate::new();
        let mut in_flight = 0u32;
        let mut owed_follow_up = false;

        for op in ops {
            match op {
                Op::Request => match gate.request() {
                    GateDecision::Launch => {
                        prop_assert_eq!(in_flight, 0);
                        in_flight += 1;
                    }
                    GateDecision::Queued => {
                        prop_assert_eq!(in_flight, 1);
                        owed_follow_up = true;
                    }
                },
                // The worker can only report back when something runs
                Op::Complete if in_flight == 1 => {
                    in_flight -= 1;
                    let relaunch = gate.complete();
                    prop_assert_eq!(relaunch, owed_follow_up);
                    if relaunch {
                        in_flight += 1;
                        owed_follow_up = false;
                    }
                }
                Op::Complete => {}
            }
            prop_assert!(in_flight <= 1);
            prop_assert_eq!(gate.is_running(), in_flight == 1);
        }
    }
}
