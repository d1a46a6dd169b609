//! Headless host for the launch gate
//!
//! A thin shell over [`launchgate_app::Driver`] that persists launch values in
//! redb and replays a scripted content surface. All orchestration logic lives
//! in the generic [`launchgate_app::Runtime`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod script;
pub mod storage;

pub use error::HostError;
pub use script::{ScriptedDriver, SurfaceScript, parse_navigation};
pub use storage::RedbStorage;
