//! Launchgate core logic
//!
//! Pure state machine logic for deciding, once per screen appearance, whether
//! the launch screen hands off to the native interface or to the embedded web
//! surface, completely decoupled from I/O.
//!
//! # Architecture
//!
//! The decision logic is a deterministic state machine isolated from timers,
//! rendering, and the embedded surface itself. Every external signal (the
//! minimum display timer, the surface readiness notification, navigation
//! reports) is delivered explicitly by the caller.
//!
//! Transitions produce declarative actions describing intended effects
//! (schedule a timer, apply an orientation, hide the loading overlay) rather
//! than executing them. A runtime or test harness interprets those actions.
//!
//! # Components
//!
//! - [`gate`]: Launch decision gate (timer, surface readiness, observed point)
//! - [`orientation`]: Allowed-orientation policy queried by the host window
//! - [`point`]: Point normalization shared by every comparison
//! - [`store`]: Reference/resume point store over a key-value [`Storage`]
//! - [`session`]: Per-appearance session tracking for the embedded surface
//! - [`error`]: Storage error types

#![forbid(unsafe_code)]

pub mod error;
pub mod gate;
pub mod orientation;
pub mod point;
pub mod session;
pub mod store;

pub use error::StoreError;
pub use gate::{GateAction, GateConfig, GateState, LaunchGate, LaunchMode};
pub use orientation::{OrientationMode, OrientationPolicy, OrientationSet};
pub use point::{normalize, normalize_observed, normalize_str, same_point};
pub use session::SessionTracker;
pub use store::{
    DEFAULT_REFERENCE_POINT, Mark, MemoryStorage, Storage, StoreKeys, StoredValue, ValueStore,
};
