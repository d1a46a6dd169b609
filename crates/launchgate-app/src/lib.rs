//! Application layer for Launchgate
//!
//! Pure presentation state machine and generic runtime for the launch screen,
//! enabling deterministic testing with the same code that runs in a host.
//!
//! # Components
//!
//! - [`Shell`]: Presentation shell (gate, orientation policy, session, store)
//! - [`Presentation`]: What the host should draw right now
//! - [`Driver`]: Trait for host-specific I/O (surface events, rendering,
//!   orientation queries)
//! - [`Runtime`]: Generic orchestration loop using a Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod driver;
mod error;
mod event;
mod presentation;
mod runtime;
mod shell;

pub use action::ShellAction;
pub use driver::Driver;
pub use error::RuntimeError;
pub use event::ShellEvent;
pub use presentation::{Content, Presentation};
pub use runtime::Runtime;
pub use shell::Shell;
