//! Simulated world for driving the real shell.
//!
//! Timers are not real: the world remembers which generation the shell last
//! scheduled and delivers it when told to, so tests control every
//! interleaving explicitly.

use launchgate_app::{Shell, ShellAction, ShellEvent};
use launchgate_core::{
    GateConfig, LaunchMode, MemoryStorage, OrientationMode, OrientationSet, Storage, StoreError,
    StoreKeys, StoredValue,
};

use crate::model::{MODEL_REFERENCE, ObservableState, Operation, OperationOutcome};

/// Real shell plus the bookkeeping a host would do.
pub struct SimWorld {
    shell: Shell<MemoryStorage>,
    pending_timer: Option<u64>,
    decisions: Vec<(u64, LaunchMode)>,
    actions: Vec<ShellAction>,
}

impl SimWorld {
    /// World whose store holds [`MODEL_REFERENCE`] as the reference point.
    pub fn new() -> Result<Self, StoreError> {
        Self::with_reference(MODEL_REFERENCE)
    }

    /// World whose store holds `reference` as the reference point.
    pub fn with_reference(reference: &str) -> Result<Self, StoreError> {
        let mut storage = MemoryStorage::new();
        storage.put(StoreKeys::REFERENCE, StoredValue::Text(reference.to_string()))?;
        Self::open(storage)
    }

    /// World over an existing storage.
    pub fn open(storage: MemoryStorage) -> Result<Self, StoreError> {
        Ok(Self {
            shell: Shell::open(storage, GateConfig::default())?,
            pending_timer: None,
            decisions: Vec::new(),
            actions: Vec::new(),
        })
    }

    /// Deliver one event and record the host-side effects.
    pub fn deliver(&mut self, event: ShellEvent) -> Result<Vec<ShellAction>, StoreError> {
        let actions = self.shell.handle(event)?;

        for action in &actions {
            match action {
                ShellAction::ScheduleTimer { generation, .. } => self.pending_timer = Some(*generation),
                ShellAction::CancelTimer => self.pending_timer = None,
                ShellAction::ModeDecided(mode) => {
                    self.decisions.push((self.shell.gate().generation(), *mode));
                },
                ShellAction::Render
                | ShellAction::RefreshOrientation(_)
                | ShellAction::HideLoading { .. } => {},
            }
        }

        self.actions.extend(actions.iter().cloned());
        Ok(actions)
    }

    /// Fire the pending display timer. No-op if none is pending.
    pub fn fire_timer(&mut self) -> Result<Vec<ShellAction>, StoreError> {
        match self.pending_timer.take() {
            Some(generation) => self.deliver(ShellEvent::TimerElapsed { generation }),
            None => Ok(Vec::new()),
        }
    }

    /// Apply a model operation to the real shell.
    pub fn apply(&mut self, op: &Operation) -> Result<OperationOutcome, StoreError> {
        let actions = match *op {
            Operation::Appear => self.deliver(ShellEvent::Appear)?,
            Operation::Teardown => self.deliver(ShellEvent::Teardown)?,
            Operation::FireTimer => self.fire_timer()?,
            Operation::FireStaleTimer => {
                let generation = self.shell.gate().generation().wrapping_sub(1);
                self.deliver(ShellEvent::TimerElapsed { generation })?
            },
            Operation::SurfaceReady => self.deliver(ShellEvent::SurfaceReady)?,
            Operation::Navigate(point) => self.deliver(ShellEvent::SurfaceNavigated(point.to_url()))?,
        };

        let mut outcome = OperationOutcome::default();
        for action in actions {
            match action {
                ShellAction::ModeDecided(mode) => outcome.decided = Some(mode),
                ShellAction::RefreshOrientation(allowed) => {
                    outcome.orientation = Some(orientation_mode(allowed));
                },
                _ => {},
            }
        }
        Ok(outcome)
    }

    /// Observable state of the real shell.
    pub fn observable_state(&self) -> ObservableState {
        let gate = self.shell.gate();
        let state = gate.state();
        ObservableState {
            mode: state.mode,
            loading_visible: state.loading_visible,
            decided: state.decided,
            rotation_rule_applied: state.rotation_rule_applied,
            orientation: self.shell.orientation().mode(),
            generation: gate.generation(),
            active: gate.is_active(),
        }
    }

    /// Shell under test.
    pub fn shell(&self) -> &Shell<MemoryStorage> {
        &self.shell
    }

    /// Every decision made, tagged with its generation.
    pub fn decisions(&self) -> &[(u64, LaunchMode)] {
        &self.decisions
    }

    /// Every action the shell emitted, in order.
    pub fn actions(&self) -> &[ShellAction] {
        &self.actions
    }

    /// Whether a display timer is pending.
    pub fn timer_pending(&self) -> bool {
        self.pending_timer.is_some()
    }
}

fn orientation_mode(allowed: OrientationSet) -> OrientationMode {
    if allowed == OrientationMode::LockedPortrait.allowed() {
        OrientationMode::LockedPortrait
    } else {
        OrientationMode::Flexible
    }
}
