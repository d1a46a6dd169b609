//! Shell actions
//!
//! Effects produced by the [`crate::Shell`] for the runtime to execute.

use std::time::Duration;

use launchgate_core::{LaunchMode, OrientationSet};

/// Actions produced by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    /// Redraw from [`crate::Shell::presentation`].
    Render,

    /// Deliver [`crate::ShellEvent::TimerElapsed`] after `delay`.
    ScheduleTimer {
        /// Appearance the timer belongs to.
        generation: u64,
        /// Delay before firing.
        delay: Duration,
    },

    /// Drop any pending display timer.
    CancelTimer,

    /// The allowed orientations changed; ask the host to re-query.
    RefreshOrientation(OrientationSet),

    /// The launch mode was decided.
    ModeDecided(LaunchMode),

    /// Fade the loading overlay out.
    HideLoading {
        /// Fade duration.
        fade: Duration,
    },
}
