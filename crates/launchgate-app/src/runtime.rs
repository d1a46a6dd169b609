//! Generic runtime for the launch shell.
//!
//! The [`Runtime`] owns the [`Shell`] and executes its actions through a
//! [`Driver`]. Every event, whether it comes from the host or from the
//! runtime's own display timer, is funneled through one queue and processed
//! to completion before the next, so shell state has a single writer.
//!
//! The display timer is a spawned task that posts
//! [`ShellEvent::TimerElapsed`] back to that queue. Teardown aborts the task;
//! a timer that already posted its event is discarded by the gate's
//! generation check.

use launchgate_core::{OrientationPolicy, Storage};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

use crate::{Driver, Presentation, RuntimeError, Shell, ShellAction, ShellEvent};

/// Orchestration loop for a [`Shell`] and a [`Driver`].
pub struct Runtime<D, S> {
    driver: D,
    shell: Shell<S>,
    events_tx: mpsc::UnboundedSender<ShellEvent>,
    events_rx: mpsc::UnboundedReceiver<ShellEvent>,
    presentation_tx: watch::Sender<Presentation>,
    timer: Option<JoinHandle<()>>,
}

impl<D: Driver, S: Storage> Runtime<D, S> {
    /// Create a runtime. Nothing runs until [`Runtime::run`] or
    /// [`Runtime::handle`].
    pub fn new(driver: D, shell: Shell<S>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (presentation_tx, _) = watch::channel(shell.presentation());

        Self { driver, shell, events_tx, events_rx, presentation_tx, timer: None }
    }

    /// Subscribe to presentation changes.
    pub fn subscribe(&self) -> watch::Receiver<Presentation> {
        self.presentation_tx.subscribe()
    }

    /// Sender for posting events onto the runtime's queue from other tasks.
    pub fn event_sender(&self) -> mpsc::UnboundedSender<ShellEvent> {
        self.events_tx.clone()
    }

    /// The shell.
    pub fn shell(&self) -> &Shell<S> {
        &self.shell
    }

    /// Orientation policy for host window-system queries.
    pub fn orientation(&self) -> &OrientationPolicy {
        self.shell.orientation()
    }

    /// The driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run until the driver reports shutdown, then tear the screen down.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver or the value store fails.
    pub async fn run(&mut self) -> Result<(), RuntimeError<D::Error>> {
        loop {
            let event = tokio::select! {
                biased;

                Some(event) = self.events_rx.recv() => event,
                polled = self.driver.next_event() => match polled.map_err(RuntimeError::Driver)? {
                    Some(event) => event,
                    None => break,
                },
            };

            self.handle(event)?;
        }

        // The screen goes away with the host.
        self.handle(ShellEvent::Teardown)?;
        self.driver.stop();
        Ok(())
    }

    /// Process queued events without waiting for the driver.
    ///
    /// Returns the number of events processed.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver or the value store fails.
    pub fn drain(&mut self) -> Result<usize, RuntimeError<D::Error>> {
        let mut processed = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle(event)?;
            processed += 1;
        }
        Ok(processed)
    }

    /// Process a single event and execute the resulting actions.
    ///
    /// Must be called from within a tokio runtime; scheduling the display
    /// timer spawns a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver or the value store fails.
    pub fn handle(&mut self, event: ShellEvent) -> Result<(), RuntimeError<D::Error>> {
        let actions = self.shell.handle(event)?;
        for action in actions {
            self.execute(action)?;
        }
        Ok(())
    }

    fn execute(&mut self, action: ShellAction) -> Result<(), RuntimeError<D::Error>> {
        match action {
            ShellAction::Render => {
                let presentation = self.shell.presentation();
                self.driver.render(&presentation).map_err(RuntimeError::Driver)?;
                self.presentation_tx.send_replace(presentation);
            },
            ShellAction::ScheduleTimer { generation, delay } => {
                self.cancel_timer();
                let events = self.events_tx.clone();
                self.timer = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    // The runtime may already be gone.
                    let _ = events.send(ShellEvent::TimerElapsed { generation });
                }));
            },
            ShellAction::CancelTimer => self.cancel_timer(),
            ShellAction::RefreshOrientation(allowed) => {
                tracing::debug!(?allowed, "refreshing allowed orientations");
                self.driver.refresh_orientation(self.shell.orientation());
            },
            ShellAction::ModeDecided(mode) => {
                tracing::debug!(?mode, "launch mode published");
            },
            ShellAction::HideLoading { fade } => {
                tracing::debug!(?fade, "fading loading overlay");
            },
        }
        Ok(())
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<D, S> Drop for Runtime<D, S> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
