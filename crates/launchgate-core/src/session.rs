//! Embedded surface session tracking.
//!
//! Tracks the surface's readiness and reveal latches for the current
//! appearance, and the last point it displayed. The last point survives
//! restarts under [`StoreKeys::LAST_POINT`].

use url::Url;

use crate::{
    error::StoreError,
    point::same_point,
    store::{Storage, StoreKeys, StoredValue, read_point},
};

/// Session state of the embedded surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTracker {
    ready: bool,
    revealed: bool,
    last_point: Option<Url>,
    at_reference: bool,
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self { ready: false, revealed: false, last_point: None, at_reference: true }
    }
}

impl SessionTracker {
    /// Restore the last point from `storage`.
    pub fn restore<S: Storage + ?Sized>(storage: &S) -> Result<Self, StoreError> {
        let last_point = read_point(storage, StoreKeys::LAST_POINT)?;
        Ok(Self { last_point, ..Self::default() })
    }

    /// Reset the per-appearance latches.
    pub fn on_appear(&mut self) {
        self.ready = false;
        self.revealed = false;
    }

    /// Mark the surface ready. Returns `true` only the first time.
    pub fn mark_ready(&mut self) -> bool {
        if self.ready {
            return false;
        }
        self.ready = true;
        true
    }

    /// Mark the surface revealed. Returns `true` only the first time.
    pub fn mark_revealed(&mut self) -> bool {
        if self.revealed {
            return false;
        }
        self.revealed = true;
        true
    }

    /// Record the surface's current point and persist it.
    ///
    /// `None` clears the persisted point.
    pub fn set_active_point<S: Storage + ?Sized>(
        &mut self,
        storage: &mut S,
        point: Option<&Url>,
        reference: &Url,
    ) -> Result<(), StoreError> {
        self.last_point = point.cloned();
        self.at_reference = point.is_some_and(|p| same_point(p, reference));

        match point {
            Some(p) => storage.put(StoreKeys::LAST_POINT, StoredValue::Text(p.as_str().to_string())),
            None => storage.remove(StoreKeys::LAST_POINT),
        }
    }

    /// Whether the surface has reported readiness this appearance.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether the surface has been revealed this appearance.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Last point the surface displayed.
    pub fn last_point(&self) -> Option<&Url> {
        self.last_point.as_ref()
    }

    /// Whether the last point is the reference point.
    pub fn is_at_reference(&self) -> bool {
        self.at_reference
    }
}
