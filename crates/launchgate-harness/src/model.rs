//! Reference model of the launch gate.
//!
//! A deliberately flat re-statement of the decision rules, with points
//! reduced to "is it the reference or not". The real shell is checked
//! against it operation by operation.

use launchgate_core::{LaunchMode, OrientationMode};
use url::Url;

/// Reference point every model world is opened with.
pub const MODEL_REFERENCE: &str = "https://example.com/home/";

/// Points the surface can report in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelPoint {
    /// The reference point without its trailing slash.
    Reference,
    /// The reference point with extra trailing slashes.
    ReferenceSlashes,
    /// Some other page.
    Other(u8),
    /// No current point.
    Cleared,
}

impl ModelPoint {
    /// Concrete URL reported by the surface.
    pub fn to_url(self) -> Option<Url> {
        let raw = match self {
            Self::Reference => "https://example.com/home".to_string(),
            Self::ReferenceSlashes => "https://example.com/home///".to_string(),
            Self::Other(n) => format!("https://example.com/page/{n}"),
            Self::Cleared => return None,
        };
        Url::parse(&raw).ok()
    }

    /// Whether the point equals the reference, `None` when cleared.
    pub fn is_reference(self) -> Option<bool> {
        match self {
            Self::Reference | Self::ReferenceSlashes => Some(true),
            Self::Other(_) => Some(false),
            Self::Cleared => None,
        }
    }
}

/// Operations applied to both the model and the real shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Screen appears.
    Appear,
    /// Screen is torn down.
    Teardown,
    /// The pending display timer fires, if one is pending.
    FireTimer,
    /// A timer from an earlier generation fires.
    FireStaleTimer,
    /// The surface reports ready.
    SurfaceReady,
    /// The surface reports a new current point.
    Navigate(ModelPoint),
}

/// One-shot effects of a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperationOutcome {
    /// Mode decided by this operation.
    pub decided: Option<LaunchMode>,
    /// Orientation mode applied by this operation.
    pub orientation: Option<OrientationMode>,
}

/// State visible from outside the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservableState {
    /// Current mode.
    pub mode: LaunchMode,
    /// Loading overlay shown.
    pub loading_visible: bool,
    /// Mode latch.
    pub decided: bool,
    /// Rotation latch.
    pub rotation_rule_applied: bool,
    /// Orientation mode the host is told to honor.
    pub orientation: OrientationMode,
    /// Appearance generation.
    pub generation: u64,
    /// Screen is on display.
    pub active: bool,
}

/// Reference gate.
#[derive(Debug, Clone)]
pub struct ModelGate {
    active: bool,
    generation: u64,
    timer_pending: bool,
    timer: bool,
    ready: bool,
    observed: Option<bool>,
    rotation_applied: bool,
    decided: bool,
    mode: LaunchMode,
    loading_visible: bool,
    orientation: OrientationMode,
}

impl Default for ModelGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelGate {
    /// Idle gate that has never appeared.
    pub fn new() -> Self {
        Self {
            active: false,
            generation: 0,
            timer_pending: false,
            timer: false,
            ready: false,
            observed: None,
            rotation_applied: false,
            decided: false,
            mode: LaunchMode::Checking,
            loading_visible: true,
            orientation: OrientationMode::Flexible,
        }
    }

    /// Apply one operation.
    pub fn apply(&mut self, op: &Operation) -> OperationOutcome {
        let mut outcome = OperationOutcome::default();

        match *op {
            Operation::Appear => {
                let generation = self.generation + 1;
                *self = Self { active: true, generation, timer_pending: true, ..Self::new() };
                outcome.orientation = Some(OrientationMode::Flexible);
            },
            Operation::Teardown => {
                self.active = false;
                self.timer_pending = false;
            },
            Operation::FireTimer => {
                if self.timer_pending {
                    self.timer_pending = false;
                    self.timer = true;
                    self.rotate(&mut outcome);
                    self.decide(&mut outcome);
                }
            },
            Operation::FireStaleTimer => {},
            Operation::SurfaceReady => {
                if self.active {
                    self.ready = true;
                    self.rotate(&mut outcome);
                    self.decide(&mut outcome);
                }
            },
            Operation::Navigate(point) => {
                if self.active {
                    self.observed = point.is_reference();
                    self.rotate(&mut outcome);
                }
            },
        }

        outcome
    }

    fn rotate(&mut self, outcome: &mut OperationOutcome) {
        if self.rotation_applied || !(self.timer && self.ready) {
            return;
        }
        let Some(at_reference) = self.observed else {
            return;
        };

        let mode =
            if at_reference { OrientationMode::LockedPortrait } else { OrientationMode::Flexible };
        self.rotation_applied = true;
        self.orientation = mode;
        outcome.orientation = Some(mode);
    }

    fn decide(&mut self, outcome: &mut OperationOutcome) {
        if self.decided || !(self.timer && self.ready) {
            return;
        }

        // Unknown point falls back to native.
        self.mode = if self.observed.unwrap_or(true) { LaunchMode::Native } else { LaunchMode::Web };
        self.decided = true;
        self.loading_visible = false;
        outcome.decided = Some(self.mode);
    }

    /// Current observable state.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState {
            mode: self.mode,
            loading_visible: self.loading_visible,
            decided: self.decided,
            rotation_rule_applied: self.rotation_applied,
            orientation: self.orientation,
            generation: self.generation,
            active: self.active,
        }
    }
}
