//! Common oracle checks.

use launchgate_core::{LaunchMode, OrientationMode, OrientationSet};

use crate::{SimWorld, scenario::OracleFn};

/// Final mode is `expected`.
pub fn mode_is(expected: LaunchMode) -> OracleFn {
    Box::new(move |world: &SimWorld| {
        let mode = world.shell().gate().mode();
        if mode == expected { Ok(()) } else { Err(format!("mode {mode:?}, expected {expected:?}")) }
    })
}

/// The host is told to allow exactly `expected`.
pub fn orientation_is(expected: OrientationSet) -> OracleFn {
    Box::new(move |world: &SimWorld| {
        let allowed = world.shell().orientation().allowed_orientations();
        if allowed == expected {
            Ok(())
        } else {
            Err(format!("orientations {allowed:?}, expected {expected:?}"))
        }
    })
}

/// Orientation policy is in `expected` mode.
pub fn orientation_mode_is(expected: OrientationMode) -> OracleFn {
    orientation_is(expected.allowed())
}

/// Undecided with the loading overlay still up.
pub fn still_checking() -> OracleFn {
    Box::new(|world: &SimWorld| {
        let state = world.shell().gate().state();
        if state.mode == LaunchMode::Checking && state.loading_visible && !state.decided {
            Ok(())
        } else {
            Err(format!("expected undecided gate, got {state:?}"))
        }
    })
}

/// No generation decided more than once.
pub fn decided_at_most_once_per_appearance() -> OracleFn {
    Box::new(|world: &SimWorld| {
        let decisions = world.decisions();
        for pair in decisions.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(format!("generation {} decided twice: {decisions:?}", pair[0].0));
            }
        }
        Ok(())
    })
}

/// Every check passes.
pub fn all_of(checks: Vec<OracleFn>) -> OracleFn {
    Box::new(move |world: &SimWorld| checks.iter().try_for_each(|check| check(world)))
}
