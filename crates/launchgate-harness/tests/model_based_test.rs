//! Model-based property tests.
//!
//! These tests generate random signal sequences and verify that the real
//! shell behaves identically to the reference model.
//!
//! ```text
//! proptest generates: Vec<Operation>
//!                          │
//!              ┌───────────┴───────────┐
//!              ▼                       ▼
//!          ModelGate               SimWorld
//!         (reference)           (real shell)
//!              └────── compare ────────┘
//! ```

use launchgate_core::LaunchMode;
use launchgate_harness::{Interleaving, ModelGate, ModelPoint, Operation, SimWorld};
use proptest::prelude::*;

fn point_strategy() -> impl Strategy<Value = ModelPoint> {
    prop_oneof![
        3 => Just(ModelPoint::Reference),
        1 => Just(ModelPoint::ReferenceSlashes),
        3 => (0u8..4).prop_map(ModelPoint::Other),
        1 => Just(ModelPoint::Cleared),
    ]
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        2 => Just(Operation::Appear),
        1 => Just(Operation::Teardown),
        3 => Just(Operation::FireTimer),
        1 => Just(Operation::FireStaleTimer),
        3 => Just(Operation::SurfaceReady),
        4 => point_strategy().prop_map(Operation::Navigate),
    ]
}

proptest! {
    /// Outcomes and observable state match after every operation.
    #[test]
    fn prop_model_matches_real(ops in prop::collection::vec(operation_strategy(), 0..60)) {
        let mut model = ModelGate::new();
        let mut real = SimWorld::new().unwrap();

        for (i, op) in ops.iter().enumerate() {
            let model_outcome = model.apply(op);
            let real_outcome = real.apply(op).unwrap();

            prop_assert_eq!(
                model_outcome,
                real_outcome,
                "Outcome divergence at operation {}: {:?}", i, op
            );
            prop_assert_eq!(
                model.observable_state(),
                real.observable_state(),
                "State divergence at operation {}: {:?}", i, op
            );
        }
    }

    /// Latches hold and no appearance decides twice.
    #[test]
    fn prop_real_invariants(ops in prop::collection::vec(operation_strategy(), 0..100)) {
        let mut real = SimWorld::new().unwrap();
        let mut previous = real.observable_state();

        for op in &ops {
            real.apply(op).unwrap();
            let state = real.observable_state();

            if state.generation == previous.generation {
                prop_assert!(!previous.decided || state.decided, "mode latch reset by {:?}", op);
                prop_assert!(
                    !previous.rotation_rule_applied || state.rotation_rule_applied,
                    "rotation latch reset by {:?}", op
                );
                if previous.decided {
                    prop_assert_eq!(previous.mode, state.mode, "mode changed after decision");
                }
            }
            prop_assert_eq!(state.decided, state.mode.is_decided());
            prop_assert_eq!(state.loading_visible, !state.decided);

            previous = state;
        }

        let decisions = real.decisions();
        for pair in decisions.windows(2) {
            prop_assert!(pair[0].0 < pair[1].0, "generation decided twice: {:?}", decisions);
        }
    }

    /// Any interleaving of one appearance decides exactly once, as the model
    /// predicts.
    #[test]
    fn prop_interleavings_decide_once(
        seed in any::<u64>(),
        navigations in prop::collection::vec(point_strategy(), 0..6),
    ) {
        let ops = Interleaving::new(seed).appearance(&navigations);
        let mut model = ModelGate::new();
        let mut real = SimWorld::new().unwrap();

        for op in &ops {
            model.apply(op);
            real.apply(op).unwrap();
        }

        prop_assert_eq!(real.decisions().len(), 1);
        prop_assert_eq!(real.decisions()[0].1, model.observable_state().mode);
        prop_assert_ne!(real.decisions()[0].1, LaunchMode::Checking);
    }
}
