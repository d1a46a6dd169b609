//! Allowed-orientation policy.
//!
//! The host window system asks "which orientations are allowed right now?"
//! whenever it re-evaluates rotation. The policy answers synchronously from
//! its in-memory mode. Changing the mode does not push anything to the host;
//! callers ask the host to re-query after each change.
//!
//! The policy is an ordinary value owned by whoever integrates with the
//! host. There is no process-wide instance.

use bitflags::bitflags;
use url::Url;

use crate::point::normalize_observed;

bitflags! {
    /// Set of interface orientations the host may rotate to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OrientationSet: u8 {
        /// Upright portrait.
        const PORTRAIT = 0b0001;
        /// Landscape with the device rotated left.
        const LANDSCAPE_LEFT = 0b0010;
        /// Landscape with the device rotated right.
        const LANDSCAPE_RIGHT = 0b0100;
    }
}

/// Orientation mode chosen by the launch gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrientationMode {
    /// Portrait and both landscape orientations.
    #[default]
    Flexible,
    /// Portrait only.
    LockedPortrait,
}

impl OrientationMode {
    /// Orientations the host may use under this mode.
    pub fn allowed(self) -> OrientationSet {
        match self {
            Self::Flexible => {
                OrientationSet::PORTRAIT
                    | OrientationSet::LANDSCAPE_LEFT
                    | OrientationSet::LANDSCAPE_RIGHT
            },
            Self::LockedPortrait => OrientationSet::PORTRAIT,
        }
    }
}

/// Current orientation mode plus the latest point reported by the surface.
#[derive(Debug, Clone, Default)]
pub struct OrientationPolicy {
    mode: OrientationMode,
    observed: Option<Url>,
}

impl OrientationPolicy {
    /// Create a policy in flexible mode with no observed point.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow portrait and landscape.
    ///
    /// Returns the newly allowed set; the caller asks the host to re-query.
    pub fn allow_flexible(&mut self) -> OrientationSet {
        self.apply(OrientationMode::Flexible)
    }

    /// Restrict the interface to portrait.
    ///
    /// Returns the newly allowed set; the caller asks the host to re-query.
    pub fn lock_portrait(&mut self) -> OrientationSet {
        self.apply(OrientationMode::LockedPortrait)
    }

    /// Switch to `mode`.
    pub fn apply(&mut self, mode: OrientationMode) -> OrientationSet {
        if self.mode != mode {
            tracing::debug!(from = ?self.mode, to = ?mode, "orientation mode changed");
        }
        self.mode = mode;
        mode.allowed()
    }

    /// Record the surface's current point.
    ///
    /// http(s) points are stored with trailing path slashes removed; other
    /// schemes are kept verbatim. Returns the stored value.
    pub fn set_observed_value(&mut self, value: Option<Url>) -> Option<&Url> {
        self.observed = value.map(normalize_observed);
        self.observed.as_ref()
    }

    /// Latest normalized point reported by the surface.
    pub fn observed_value(&self) -> Option<&Url> {
        self.observed.as_ref()
    }

    /// Current mode.
    pub fn mode(&self) -> OrientationMode {
        self.mode
    }

    /// Orientations the host may currently use.
    pub fn allowed_orientations(&self) -> OrientationSet {
        self.mode.allowed()
    }
}
