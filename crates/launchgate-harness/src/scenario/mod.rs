//! Oracle-enforced scenario tests.
//!
//! A [`Scenario`] lists surface signals in order; it cannot be run until an
//! oracle is attached with [`Scenario::oracle`].

mod builder;
pub mod oracle;

pub use builder::{RunnableScenario, Scenario};

use crate::SimWorld;

/// Verification run against the world once every step has been applied.
pub type OracleFn = Box<dyn Fn(&SimWorld) -> Result<(), String>>;
