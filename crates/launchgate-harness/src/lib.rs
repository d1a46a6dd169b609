//! Deterministic test harness for the launch gate.
//!
//! Provides a reference model of the gate, a simulated world that drives the
//! real [`launchgate_app::Shell`] without a clock, an oracle-enforcing
//! scenario builder, and seeded signal interleavings.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod interleave;
pub mod model;
pub mod scenario;
pub mod world;

pub use interleave::Interleaving;
pub use model::{MODEL_REFERENCE, ModelGate, ModelPoint, ObservableState, Operation, OperationOutcome};
pub use scenario::{OracleFn, RunnableScenario, Scenario};
pub use world::SimWorld;
