//! Shell events
//!
//! Inputs to the [`crate::Shell`] state machine. Every event is processed to
//! completion on a single queue.

use url::Url;

/// Events consumed by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// The launch screen appeared (first launch or return to it).
    Appear,

    /// The launch screen was torn down.
    Teardown,

    /// The minimum display timer fired.
    TimerElapsed {
        /// Appearance the timer was scheduled for.
        generation: u64,
    },

    /// The embedded surface finished its first meaningful render.
    SurfaceReady,

    /// The embedded surface's current point changed.
    SurfaceNavigated(Option<Url>),
}
