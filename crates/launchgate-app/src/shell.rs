//! Presentation shell state machine.
//!
//! Owns the launch gate, the orientation policy, the surface session and the
//! value store, and turns [`ShellEvent`]s into [`ShellAction`]s. Surface
//! navigation is normalized by the orientation policy before the gate sees
//! it, so the gate and the host always agree on the observed point.

use launchgate_core::{
    GateAction, GateConfig, LaunchGate, LaunchMode, OrientationPolicy, SessionTracker, Storage,
    StoreError, ValueStore,
};
use url::Url;

use crate::{Content, Presentation, ShellAction, ShellEvent};

/// Launch screen shell.
#[derive(Debug)]
pub struct Shell<S> {
    store: ValueStore<S>,
    gate: LaunchGate,
    orientation: OrientationPolicy,
    session: SessionTracker,
    start_point: Url,
}

impl<S: Storage> Shell<S> {
    /// Load persisted values from `storage` and build an idle shell.
    ///
    /// Nothing happens until [`ShellEvent::Appear`].
    pub fn open(storage: S, config: GateConfig) -> Result<Self, StoreError> {
        let store = ValueStore::open(storage)?;
        let start_point = store.starting_point()?;
        let session = SessionTracker::restore(store.storage())?;
        let gate = LaunchGate::new(store.reference_point().clone(), config);

        Ok(Self { store, gate, orientation: OrientationPolicy::new(), session, start_point })
    }

    /// Process one event.
    ///
    /// # Errors
    ///
    /// Returns an error only if the storage backend fails while reading the
    /// starting point on appearance. Failed writes of the session point or
    /// the resume point are logged and do not interrupt the gate.
    pub fn handle(&mut self, event: ShellEvent) -> Result<Vec<ShellAction>, StoreError> {
        let gate_actions = match event {
            ShellEvent::Appear => {
                self.session.on_appear();
                self.start_point = self.store.starting_point()?;
                self.gate.appear()
            },
            ShellEvent::Teardown => {
                self.gate.teardown();
                return Ok(vec![ShellAction::CancelTimer]);
            },
            ShellEvent::TimerElapsed { generation } => self.gate.timer_elapsed(generation),
            ShellEvent::SurfaceReady => {
                if self.gate.is_active() {
                    self.session.mark_ready();
                }
                self.gate.surface_ready()
            },
            ShellEvent::SurfaceNavigated(value) => {
                let observed = self.orientation.set_observed_value(value).cloned();
                let actions = self.gate.value_changed(observed.clone());
                self.record_active_point(observed.as_ref());
                actions
            },
        };

        let mut actions = Vec::with_capacity(gate_actions.len() + 1);
        for action in gate_actions {
            match action {
                GateAction::ScheduleTimer { generation, delay } => {
                    actions.push(ShellAction::ScheduleTimer { generation, delay });
                },
                GateAction::ApplyOrientation(mode) => {
                    let allowed = self.orientation.apply(mode);
                    actions.push(ShellAction::RefreshOrientation(allowed));
                },
                GateAction::ModeDecided(mode) => {
                    if mode == LaunchMode::Web {
                        self.remember_web_point();
                    }
                    actions.push(ShellAction::ModeDecided(mode));
                },
                GateAction::HideLoading { fade } => {
                    self.session.mark_revealed();
                    actions.push(ShellAction::HideLoading { fade });
                },
            }
        }

        if !actions.is_empty() {
            actions.push(ShellAction::Render);
        }
        Ok(actions)
    }

    // Write failures are logged, never propagated.

    fn record_active_point(&mut self, point: Option<&Url>) {
        let result =
            self.session.set_active_point(self.store.storage_mut(), point, self.gate.reference());
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist active point");
        }
    }

    fn remember_web_point(&mut self) {
        let Some(point) = self.gate.state().observed.clone() else {
            return;
        };
        if let Err(e) = self.store.store_resume_point_once(&point) {
            tracing::warn!(error = %e, resume = point.as_str(), "failed to persist resume point");
        }
    }

    /// What the host should draw.
    pub fn presentation(&self) -> Presentation {
        let state = self.gate.state();
        let content = if state.mode == LaunchMode::Native && !state.loading_visible {
            Content::Native
        } else {
            Content::Surface { start_point: self.start_point.clone(), visible: !state.loading_visible }
        };

        Presentation { mode: state.mode, content, loading_overlay: state.loading_visible }
    }

    /// Launch gate.
    pub fn gate(&self) -> &LaunchGate {
        &self.gate
    }

    /// Orientation policy the host queries.
    pub fn orientation(&self) -> &OrientationPolicy {
        &self.orientation
    }

    /// Surface session.
    pub fn session(&self) -> &SessionTracker {
        &self.session
    }

    /// Value store.
    pub fn store(&self) -> &ValueStore<S> {
        &self.store
    }

    /// Point the surface loads first this appearance.
    pub fn start_point(&self) -> &Url {
        &self.start_point
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use launchgate_core::{MemoryStorage, OrientationMode, OrientationSet, StoreKeys, StoredValue};

    use super::*;

    /// Storage whose writes to one key always fail.
    struct FailingWrites {
        inner: MemoryStorage,
        key: &'static str,
    }

    impl Storage for FailingWrites {
        fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
            self.inner.get(key)
        }

        fn put(&mut self, key: &str, value: StoredValue) -> Result<(), StoreError> {
            if key == self.key {
                return Err(StoreError::Backend("disk full".into()));
            }
            self.inner.put(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    fn failing_shell(key: &'static str) -> Shell<FailingWrites> {
        let mut inner = MemoryStorage::new();
        inner
            .put(StoreKeys::REFERENCE, StoredValue::Text("https://example.com/home/".into()))
            .unwrap();
        Shell::open(FailingWrites { inner, key }, GateConfig::default()).unwrap()
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn shell(reference: &str) -> Shell<MemoryStorage> {
        let mut storage = MemoryStorage::new();
        storage.put(StoreKeys::REFERENCE, StoredValue::Text(reference.to_string())).unwrap();
        Shell::open(storage, GateConfig::default()).unwrap()
    }

    #[test]
    fn appear_starts_loading() {
        let mut shell = shell("https://example.com/home/");
        let actions = shell.handle(ShellEvent::Appear).unwrap();

        assert_eq!(
            actions,
            vec![
                ShellAction::RefreshOrientation(OrientationSet::all()),
                ShellAction::ScheduleTimer { generation: 1, delay: Duration::from_millis(2200) },
                ShellAction::Render,
            ]
        );
        assert_eq!(shell.presentation(), Presentation::loading(url("https://example.com/home/")));
    }

    #[test]
    fn native_decision_swaps_content() {
        let mut shell = shell("https://example.com/home/");
        shell.handle(ShellEvent::Appear).unwrap();
        shell.handle(ShellEvent::SurfaceReady).unwrap();
        shell.handle(ShellEvent::SurfaceNavigated(Some(url("https://example.com/home")))).unwrap();

        let actions = shell.handle(ShellEvent::TimerElapsed { generation: 1 }).unwrap();
        assert!(actions.contains(&ShellAction::ModeDecided(LaunchMode::Native)));
        assert!(actions.contains(&ShellAction::RefreshOrientation(OrientationSet::PORTRAIT)));

        let presentation = shell.presentation();
        assert!(presentation.is_native());
        assert!(!presentation.loading_overlay);
        assert_eq!(shell.orientation().mode(), OrientationMode::LockedPortrait);
        assert!(shell.session().is_revealed());
    }

    #[test]
    fn web_decision_reveals_surface_and_remembers_point() {
        let mut shell = shell("https://example.com/home/");
        shell.handle(ShellEvent::Appear).unwrap();
        shell.handle(ShellEvent::TimerElapsed { generation: 1 }).unwrap();
        shell.handle(ShellEvent::SurfaceNavigated(Some(url("https://example.com/other/")))).unwrap();
        shell.handle(ShellEvent::SurfaceReady).unwrap();

        let presentation = shell.presentation();
        assert_eq!(presentation.mode, LaunchMode::Web);
        assert_eq!(
            presentation.content,
            Content::Surface { start_point: url("https://example.com/home/"), visible: true }
        );
        assert_eq!(shell.orientation().mode(), OrientationMode::Flexible);
        assert_eq!(shell.store().resume_point().unwrap(), Some(url("https://example.com/other")));
    }

    #[test]
    fn navigation_is_normalized_and_persisted() {
        let mut shell = shell("https://example.com/home/");
        shell.handle(ShellEvent::Appear).unwrap();
        shell.handle(ShellEvent::SurfaceNavigated(Some(url("https://example.com/a/b//")))).unwrap();

        assert_eq!(shell.orientation().observed_value(), Some(&url("https://example.com/a/b")));
        assert_eq!(shell.gate().state().observed, Some(url("https://example.com/a/b")));
        assert_eq!(
            shell.store().storage().get(StoreKeys::LAST_POINT).unwrap(),
            Some(StoredValue::Text("https://example.com/a/b".to_string()))
        );
    }

    #[test]
    fn surface_stays_hidden_while_checking() {
        let mut shell = shell("https://example.com/home/");
        shell.handle(ShellEvent::Appear).unwrap();
        shell.handle(ShellEvent::TimerElapsed { generation: 1 }).unwrap();

        let presentation = shell.presentation();
        assert_eq!(presentation.mode, LaunchMode::Checking);
        assert!(presentation.loading_overlay);
        assert!(!presentation.is_native());
    }

    #[test]
    fn teardown_cancels_timer() {
        let mut shell = shell("https://example.com/home/");
        shell.handle(ShellEvent::Appear).unwrap();

        assert_eq!(shell.handle(ShellEvent::Teardown).unwrap(), vec![ShellAction::CancelTimer]);
        assert!(shell.handle(ShellEvent::TimerElapsed { generation: 1 }).unwrap().is_empty());
    }

    #[test]
    fn resume_point_becomes_next_start_point() {
        let mut storage = MemoryStorage::new();
        storage
            .put(StoreKeys::REFERENCE, StoredValue::Text("https://example.com/home/".into()))
            .unwrap();
        storage.put(StoreKeys::RESUME, StoredValue::Text("https://example.com/book/7".into())).unwrap();

        let mut shell = Shell::open(storage, GateConfig::default()).unwrap();
        shell.handle(ShellEvent::Appear).unwrap();
        assert_eq!(shell.start_point(), &url("https://example.com/book/7"));
    }

    #[test]
    fn failed_point_write_still_reaches_gate() {
        let mut shell = failing_shell(StoreKeys::LAST_POINT);
        shell.handle(ShellEvent::Appear).unwrap();
        shell.handle(ShellEvent::SurfaceNavigated(Some(url("https://example.com/other")))).unwrap();

        assert_eq!(shell.gate().state().observed, Some(url("https://example.com/other")));

        shell.handle(ShellEvent::SurfaceReady).unwrap();
        let actions = shell.handle(ShellEvent::TimerElapsed { generation: 1 }).unwrap();
        assert!(actions.contains(&ShellAction::ModeDecided(LaunchMode::Web)));
        assert_eq!(shell.gate().mode(), LaunchMode::Web);
    }

    #[test]
    fn failed_resume_write_still_hides_loading() {
        let mut shell = failing_shell(StoreKeys::RESUME);
        shell.handle(ShellEvent::Appear).unwrap();
        shell.handle(ShellEvent::SurfaceNavigated(Some(url("https://example.com/other")))).unwrap();
        shell.handle(ShellEvent::SurfaceReady).unwrap();

        let actions = shell.handle(ShellEvent::TimerElapsed { generation: 1 }).unwrap();
        assert!(actions.contains(&ShellAction::ModeDecided(LaunchMode::Web)));
        assert!(actions.contains(&ShellAction::HideLoading { fade: Duration::from_millis(350) }));
        assert_eq!(actions.last(), Some(&ShellAction::Render));
        assert!(!shell.presentation().loading_overlay);
        assert_eq!(shell.store().resume_point().unwrap(), None);
    }
}
