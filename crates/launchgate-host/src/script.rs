//! Scripted content surface.
//!
//! Stands in for the embedded surface in the headless host: it replays a
//! fixed timeline of surface events relative to the moment the host starts,
//! then tears the screen down and shuts the host down.

use std::{collections::VecDeque, time::Duration};

use launchgate_app::{Driver, Presentation, ShellEvent};
use launchgate_core::{OrientationPolicy, OrientationSet};
use tokio::time::Instant;
use url::Url;

use crate::HostError;

/// Parse a `<millis>=<url>` navigation entry.
pub fn parse_navigation(entry: &str) -> Result<(Duration, Url), HostError> {
    let invalid = |reason: &str| HostError::Script { entry: entry.to_string(), reason: reason.to_string() };

    let (millis, point) = entry.split_once('=').ok_or_else(|| invalid("expected <millis>=<url>"))?;
    let millis: u64 = millis.trim().parse().map_err(|_| invalid("offset is not a whole number of milliseconds"))?;
    let point = Url::parse(point.trim()).map_err(|e| invalid(&e.to_string()))?;

    Ok((Duration::from_millis(millis), point))
}

/// Timeline of surface events.
#[derive(Debug, Clone, Default)]
pub struct SurfaceScript {
    entries: Vec<(Duration, ShellEvent)>,
}

impl SurfaceScript {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// The surface becomes ready at `at`.
    #[must_use]
    pub fn ready_at(mut self, at: Duration) -> Self {
        self.entries.push((at, ShellEvent::SurfaceReady));
        self
    }

    /// The surface navigates to `point` at `at`.
    #[must_use]
    pub fn navigate_at(mut self, at: Duration, point: Url) -> Self {
        self.entries.push((at, ShellEvent::SurfaceNavigated(Some(point))));
        self
    }

    /// Build the full host timeline: appear at zero, the scripted surface
    /// events in time order, teardown at `run_for`.
    fn into_timeline(mut self, run_for: Duration) -> VecDeque<(Duration, ShellEvent)> {
        // Stable sort keeps entries with equal offsets in insertion order.
        self.entries.sort_by_key(|(at, _)| *at);

        let mut timeline = VecDeque::with_capacity(self.entries.len() + 2);
        timeline.push_back((Duration::ZERO, ShellEvent::Appear));
        timeline.extend(self.entries.into_iter().filter(|(at, _)| *at < run_for));
        timeline.push_back((run_for, ShellEvent::Teardown));
        timeline
    }
}

/// Driver replaying a [`SurfaceScript`] and recording what it was asked to
/// show.
pub struct ScriptedDriver {
    started: Instant,
    timeline: VecDeque<(Duration, ShellEvent)>,
    allowed: OrientationSet,
    last_render: Option<Presentation>,
    stopped: bool,
}

impl ScriptedDriver {
    /// Replay `script`, tearing down after `run_for`.
    pub fn new(script: SurfaceScript, run_for: Duration) -> Self {
        Self {
            started: Instant::now(),
            timeline: script.into_timeline(run_for),
            allowed: OrientationSet::all(),
            last_render: None,
            stopped: false,
        }
    }

    /// Orientations the host window would currently allow.
    pub fn allowed_orientations(&self) -> OrientationSet {
        self.allowed
    }

    /// Most recent presentation rendered.
    pub fn last_render(&self) -> Option<&Presentation> {
        self.last_render.as_ref()
    }

    /// Whether the runtime stopped the driver.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Driver for ScriptedDriver {
    type Error = HostError;

    async fn next_event(&mut self) -> Result<Option<ShellEvent>, Self::Error> {
        // Peek first so a cancelled wait leaves the entry in place.
        let Some((at, _)) = self.timeline.front() else {
            return Ok(None);
        };
        tokio::time::sleep_until(self.started + *at).await;
        Ok(self.timeline.pop_front().map(|(_, event)| event))
    }

    fn refresh_orientation(&mut self, policy: &OrientationPolicy) {
        self.allowed = policy.allowed_orientations();
        tracing::info!(allowed = ?self.allowed, "host re-queried orientations");
    }

    fn render(&mut self, presentation: &Presentation) -> Result<(), Self::Error> {
        tracing::info!(
            mode = ?presentation.mode,
            native = presentation.is_native(),
            loading = presentation.loading_overlay,
            "render"
        );
        self.last_render = Some(presentation.clone());
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}
