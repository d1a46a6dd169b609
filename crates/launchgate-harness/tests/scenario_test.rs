//! Launch scenarios.
//!
//! Each scenario lists surface signals in order and ends with an oracle over
//! the real shell.

use launchgate_core::{
    DEFAULT_REFERENCE_POINT, LaunchMode, OrientationMode, OrientationSet, Storage, StoreKeys,
    StoredValue,
};
use launchgate_harness::{
    Scenario, SimWorld,
    scenario::oracle::{
        all_of, decided_at_most_once_per_appearance, mode_is, orientation_is, orientation_mode_is,
        still_checking,
    },
};

#[test]
fn ready_at_reference_then_timer_goes_native() {
    Scenario::new("native launch")
        .appear()
        .surface_ready()
        .navigate("https://example.com/home")
        .fire_timer()
        .oracle(all_of(vec![
            mode_is(LaunchMode::Native),
            orientation_is(OrientationSet::PORTRAIT),
            decided_at_most_once_per_appearance(),
        ]))
        .run()
        .unwrap();
}

#[test]
fn other_point_then_ready_goes_web() {
    Scenario::new("web launch")
        .appear()
        .navigate("https://example.com/other")
        .fire_timer()
        .surface_ready()
        .oracle(all_of(vec![
            mode_is(LaunchMode::Web),
            orientation_mode_is(OrientationMode::Flexible),
            Box::new(|world: &SimWorld| -> Result<(), String> {
                let resume = world.shell().store().resume_point().map_err(|e| e.to_string())?;
                match resume {
                    Some(point) if point.as_str() == "https://example.com/other" => Ok(()),
                    other => Err(format!("resume point {other:?}")),
                }
            }),
        ]))
        .run()
        .unwrap();
}

#[test]
fn never_ready_stays_checking() {
    Scenario::new("surface never ready")
        .appear()
        .navigate("https://example.com/home/")
        .fire_timer()
        .oracle(all_of(vec![still_checking(), orientation_is(OrientationSet::all())]))
        .run()
        .unwrap();
}

#[test]
fn navigation_after_decision_changes_nothing() {
    Scenario::new("late navigation")
        .appear()
        .navigate("https://example.com/home")
        .surface_ready()
        .fire_timer()
        .navigate("https://example.com/elsewhere")
        .oracle(all_of(vec![mode_is(LaunchMode::Native), orientation_is(OrientationSet::PORTRAIT)]))
        .run()
        .unwrap();
}

#[test]
fn unknown_point_falls_back_to_native() {
    Scenario::new("no point reported")
        .appear()
        .surface_ready()
        .fire_timer()
        .oracle(all_of(vec![mode_is(LaunchMode::Native), orientation_is(OrientationSet::all())]))
        .run()
        .unwrap();
}

#[test]
fn teardown_discards_timer() {
    Scenario::new("teardown")
        .appear()
        .surface_ready()
        .teardown()
        .fire_timer()
        .oracle(still_checking())
        .run()
        .unwrap();
}

#[test]
fn reappearance_decides_again() {
    Scenario::new("reappear")
        .appear()
        .navigate("https://example.com/other")
        .surface_ready()
        .fire_timer()
        .teardown()
        .appear()
        .navigate("https://example.com/home")
        .surface_ready()
        .fire_timer()
        .oracle(all_of(vec![
            mode_is(LaunchMode::Native),
            decided_at_most_once_per_appearance(),
            Box::new(|world: &SimWorld| match world.decisions() {
                [(1, LaunchMode::Web), (2, LaunchMode::Native)] => Ok(()),
                other => Err(format!("decisions {other:?}")),
            }),
        ]))
        .run()
        .unwrap();
}

#[test]
fn fresh_store_uses_default_reference() {
    Scenario::new("default reference")
        .fresh_store()
        .appear()
        .navigate(DEFAULT_REFERENCE_POINT)
        .surface_ready()
        .fire_timer()
        .oracle(all_of(vec![
            mode_is(LaunchMode::Native),
            Box::new(|world: &SimWorld| -> Result<(), String> {
                let reference = world.shell().store().reference_point();
                if reference.as_str() == DEFAULT_REFERENCE_POINT {
                    Ok(())
                } else {
                    Err(format!("reference {reference}"))
                }
            }),
        ]))
        .run()
        .unwrap();
}

#[test]
fn session_point_is_remembered_away_from_reference() {
    Scenario::new("session point")
        .appear()
        .navigate("https://example.com/book/7")
        .oracle(Box::new(|world: &SimWorld| -> Result<(), String> {
            let stored = world
                .shell()
                .store()
                .storage()
                .get(StoreKeys::LAST_POINT)
                .map_err(|e| e.to_string())?;
            match stored {
                Some(StoredValue::Text(point)) if point == "https://example.com/book/7" => Ok(()),
                other => Err(format!("last point {other:?}")),
            }
        }))
        .run()
        .unwrap();
}

#[test]
fn scenario_reports_bad_points() {
    let result = Scenario::new("bad point")
        .appear()
        .navigate("not a url")
        .oracle(still_checking())
        .run();

    assert!(result.unwrap_err().contains("bad point"));
}
