//! Driver trait for abstracting host I/O.
//!
//! The [`Driver`] trait decouples the runtime from a specific host. Each host
//! (a mobile shell, the headless CLI host, a test double) implements the
//! trait, while the generic [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use launchgate_core::OrientationPolicy;

use crate::{Presentation, ShellEvent};

/// Abstracts host I/O for the launch runtime.
///
/// Implementations provide host-specific I/O while the generic
/// [`crate::Runtime`] handles orchestration logic, so the same orchestration
/// code runs in a real host and under test.
pub trait Driver: Send {
    /// Host-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next host or surface event.
    ///
    /// Returns `None` when the host is shutting down. The runtime may drop
    /// this future before it completes, so implementations must not lose an
    /// event when cancelled.
    fn next_event(&mut self) -> impl Future<Output = Result<Option<ShellEvent>, Self::Error>> + Send;

    /// The allowed orientations changed.
    ///
    /// The host re-queries `policy` now and whenever its window system asks
    /// again later.
    fn refresh_orientation(&mut self, policy: &OrientationPolicy);

    /// Render the presentation.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, presentation: &Presentation) -> Result<(), Self::Error>;

    /// Release host resources.
    fn stop(&mut self);
}
