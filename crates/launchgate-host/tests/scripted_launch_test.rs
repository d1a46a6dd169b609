//! Scripted launch tests
//!
//! Runs the generic runtime with the scripted surface driver under a paused
//! clock, covering the launch scenarios end to end.

use std::time::Duration;

use launchgate_app::{Runtime, Shell};
use launchgate_core::{
    GateConfig, LaunchMode, MemoryStorage, OrientationSet, Storage, StoreKeys, StoredValue,
};
use launchgate_host::{ScriptedDriver, SurfaceScript};
use url::Url;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn shell() -> Shell<MemoryStorage> {
    let mut storage = MemoryStorage::new();
    storage.put(StoreKeys::REFERENCE, StoredValue::Text("https://example.com/home/".into())).unwrap();
    Shell::open(storage, GateConfig::default()).unwrap()
}

#[tokio::test(start_paused = true)]
async fn ready_then_home_then_timer_goes_native() {
    let script = SurfaceScript::new()
        .ready_at(Duration::from_millis(500))
        .navigate_at(Duration::from_millis(900), url("https://example.com/home"));
    let mut runtime = Runtime::new(ScriptedDriver::new(script, Duration::from_secs(4)), shell());

    runtime.run().await.unwrap();

    let state = runtime.shell().gate().state();
    assert_eq!(state.mode, LaunchMode::Native);
    assert!(state.rotation_rule_applied);
    assert!(!state.loading_visible);

    let driver = runtime.driver();
    assert!(driver.is_stopped());
    assert_eq!(driver.allowed_orientations(), OrientationSet::PORTRAIT);
    assert!(driver.last_render().is_some_and(|p| p.is_native()));
}

#[tokio::test(start_paused = true)]
async fn other_point_then_late_ready_goes_web() {
    let script = SurfaceScript::new()
        .navigate_at(Duration::from_millis(300), url("https://example.com/other"))
        .ready_at(Duration::from_millis(3000));
    let mut runtime = Runtime::new(ScriptedDriver::new(script, Duration::from_secs(4)), shell());

    runtime.run().await.unwrap();

    assert_eq!(runtime.shell().gate().mode(), LaunchMode::Web);
    assert_eq!(runtime.driver().allowed_orientations(), OrientationSet::all());
    assert_eq!(
        runtime.shell().store().resume_point().unwrap(),
        Some(url("https://example.com/other"))
    );
}

#[tokio::test(start_paused = true)]
async fn surface_never_ready_stays_checking() {
    let script = SurfaceScript::new().navigate_at(Duration::from_millis(100), url("https://example.com/home"));
    let mut runtime = Runtime::new(ScriptedDriver::new(script, Duration::from_secs(10)), shell());

    runtime.run().await.unwrap();

    let state = runtime.shell().gate().state();
    assert_eq!(state.mode, LaunchMode::Checking);
    assert!(state.loading_visible);
    assert!(state.min_time_elapsed);
    assert!(!state.decided);
}

#[tokio::test(start_paused = true)]
async fn teardown_before_timer_leaves_gate_undecided() {
    let script = SurfaceScript::new().ready_at(Duration::from_millis(200));
    let mut runtime = Runtime::new(ScriptedDriver::new(script, Duration::from_secs(1)), shell());

    runtime.run().await.unwrap();

    assert!(!runtime.shell().gate().is_active());
    assert_eq!(runtime.shell().gate().mode(), LaunchMode::Checking);
}
