//! Launch decision gate.
//!
//! Decides, once per screen appearance, whether the launch screen hands off to
//! the native interface or keeps the embedded surface, and whether rotation is
//! locked to portrait.
//!
//! # Architecture: Action-Based State Machine
//!
//! - Each input signal has one entry point
//! - Entry points return `Vec<GateAction>` describing effects to execute
//! - The driver schedules the timer, applies orientations, and fades the
//!   loading overlay
//!
//! # Signals
//!
//! Three signals arrive in any order:
//!
//! - **Timer elapsed**: fired once, `min_display` after appearance
//! - **Surface ready**: the surface finished its first meaningful render
//! - **Value changed**: the surface navigated; zero or more times, any time
//!
//! # Transitions
//!
//! ```text
//!                     timer ∧ ready
//! ┌──────────┐   observed ≡ reference   ┌────────┐
//! │ Checking │─────────────────────────>│ Native │
//! └──────────┘                          └────────┘
//!      │          timer ∧ ready
//!      │     observed ≢ reference       ┌────────┐
//!      └───────────────────────────────>│  Web   │
//!                                       └────────┘
//! ```
//!
//! With no observed point the comparison falls back to the reference point
//! itself, so the gate resolves to native.
//!
//! The rotation rule is a separate one-shot latch. It needs the timer, the
//! ready signal, *and* an observed point, and locks portrait when the
//! observed point is the reference point.
//!
//! Timer callbacks carry the generation they were scheduled for. A callback
//! from an earlier appearance, or one that lands after teardown, is ignored.

use std::time::Duration;

use url::Url;

use crate::{orientation::OrientationMode, point::same_point};

/// Presentation mode chosen by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LaunchMode {
    /// No decision yet.
    #[default]
    Checking,
    /// Hand off to the native interface.
    Native,
    /// Keep the embedded web surface.
    Web,
}

impl LaunchMode {
    /// Whether a final mode has been chosen.
    pub fn is_decided(self) -> bool {
        !matches!(self, Self::Checking)
    }
}

/// Gate timing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Minimum time the loading overlay stays up.
    pub min_display: Duration,
    /// Duration of the loading overlay fade-out.
    pub fade: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self { min_display: Duration::from_millis(2200), fade: Duration::from_millis(350) }
    }
}

/// Actions returned by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    /// Deliver [`LaunchGate::timer_elapsed`] with `generation` after `delay`.
    ScheduleTimer {
        /// Appearance the timer belongs to.
        generation: u64,
        /// Delay before firing.
        delay: Duration,
    },

    /// Apply this orientation mode and ask the host to re-query.
    ApplyOrientation(OrientationMode),

    /// The one-shot mode decision was made.
    ModeDecided(LaunchMode),

    /// Fade out the loading overlay.
    HideLoading {
        /// Fade duration.
        fade: Duration,
    },
}

/// Snapshot of the gate's per-appearance state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateState {
    /// Current mode; leaves `Checking` at most once.
    pub mode: LaunchMode,
    /// The minimum display timer fired.
    pub min_time_elapsed: bool,
    /// The surface reported readiness.
    pub surface_ready: bool,
    /// Latest point reported by the surface.
    pub observed: Option<Url>,
    /// Rotation rule latch.
    pub rotation_rule_applied: bool,
    /// Mode decision latch.
    pub decided: bool,
    /// Loading overlay visibility.
    pub loading_visible: bool,
}

impl Default for GateState {
    fn default() -> Self {
        Self {
            mode: LaunchMode::Checking,
            min_time_elapsed: false,
            surface_ready: false,
            observed: None,
            rotation_rule_applied: false,
            decided: false,
            loading_visible: true,
        }
    }
}

/// Launch decision gate for one screen.
///
/// Call [`LaunchGate::appear`] every time the screen appears; it resets all
/// per-appearance state and starts a new generation.
#[derive(Debug, Clone)]
pub struct LaunchGate {
    reference: Url,
    config: GateConfig,
    generation: u64,
    active: bool,
    state: GateState,
}

impl LaunchGate {
    /// Create a gate comparing against `reference`.
    ///
    /// The gate ignores every signal until the first [`LaunchGate::appear`].
    pub fn new(reference: Url, config: GateConfig) -> Self {
        Self { reference, config, generation: 0, active: false, state: GateState::default() }
    }

    /// Reference point the gate compares against.
    pub fn reference(&self) -> &Url {
        &self.reference
    }

    /// Current per-appearance state.
    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Current mode.
    pub fn mode(&self) -> LaunchMode {
        self.state.mode
    }

    /// Generation of the current (or last) appearance.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the screen is currently on display.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Timing configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// The screen appeared.
    ///
    /// Resets the state, starts a new generation, allows flexible rotation,
    /// and schedules the minimum display timer.
    pub fn appear(&mut self) -> Vec<GateAction> {
        self.generation += 1;
        self.active = true;
        self.state = GateState::default();

        tracing::debug!(generation = self.generation, "launch screen appeared");

        vec![
            GateAction::ApplyOrientation(OrientationMode::Flexible),
            GateAction::ScheduleTimer {
                generation: self.generation,
                delay: self.config.min_display,
            },
        ]
    }

    /// The screen was torn down.
    ///
    /// Any timer still pending for this generation becomes a no-op.
    pub fn teardown(&mut self) {
        if self.active {
            tracing::debug!(generation = self.generation, "launch screen torn down");
        }
        self.active = false;
    }

    /// The minimum display timer for `generation` fired.
    pub fn timer_elapsed(&mut self, generation: u64) -> Vec<GateAction> {
        if !self.active || generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                active = self.active,
                "ignoring stale display timer"
            );
            return Vec::new();
        }

        self.state.min_time_elapsed = true;

        let mut actions = self.apply_rotation_rule();
        actions.extend(self.try_decide());
        actions
    }

    /// The surface finished its first meaningful render.
    pub fn surface_ready(&mut self) -> Vec<GateAction> {
        if !self.active {
            tracing::debug!("ignoring surface ready while inactive");
            return Vec::new();
        }

        self.state.surface_ready = true;

        let mut actions = self.apply_rotation_rule();
        actions.extend(self.try_decide());
        actions
    }

    /// The surface's current point changed.
    ///
    /// Only the rotation rule is re-evaluated; the mode decision waits for
    /// the timer and the ready signal.
    pub fn value_changed(&mut self, value: Option<Url>) -> Vec<GateAction> {
        if !self.active {
            tracing::debug!("ignoring surface navigation while inactive");
            return Vec::new();
        }

        self.state.observed = value;
        self.apply_rotation_rule()
    }

    fn apply_rotation_rule(&mut self) -> Vec<GateAction> {
        if self.state.rotation_rule_applied {
            return Vec::new();
        }
        if !(self.state.min_time_elapsed && self.state.surface_ready) {
            return Vec::new();
        }
        let Some(observed) = self.state.observed.as_ref() else {
            return Vec::new();
        };

        let mode = if same_point(observed, &self.reference) {
            OrientationMode::LockedPortrait
        } else {
            OrientationMode::Flexible
        };

        self.state.rotation_rule_applied = true;
        tracing::info!(generation = self.generation, ?mode, "rotation rule applied");

        vec![GateAction::ApplyOrientation(mode)]
    }

    fn try_decide(&mut self) -> Vec<GateAction> {
        if !(self.state.min_time_elapsed && self.state.surface_ready) {
            return Vec::new();
        }

        if self.state.decided {
            if self.state.loading_visible {
                self.state.loading_visible = false;
                return vec![GateAction::HideLoading { fade: self.config.fade }];
            }
            return Vec::new();
        }

        let current = self.state.observed.as_ref().unwrap_or(&self.reference);
        let mode =
            if same_point(current, &self.reference) { LaunchMode::Native } else { LaunchMode::Web };

        self.state.decided = true;
        self.state.mode = mode;
        self.state.loading_visible = false;

        tracing::info!(
            generation = self.generation,
            ?mode,
            observed = self.state.observed.as_ref().map(Url::as_str),
            "launch mode decided"
        );

        vec![GateAction::ModeDecided(mode), GateAction::HideLoading { fade: self.config.fade }]
    }
}
