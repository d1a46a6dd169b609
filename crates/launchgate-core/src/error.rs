//! Error types for launch value storage.
//!
//! Malformed URLs are never errors here: they are treated as absent values.
//! Only failures of the underlying key-value backend surface to callers.

use thiserror::Error;

/// Errors raised by a [`crate::Storage`] backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend failed to read or write.
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// A stored value could not be encoded or decoded.
    #[error("stored value codec failure for key {key}: {reason}")]
    Codec {
        /// Key whose value failed to round-trip.
        key: String,
        /// Underlying codec message.
        reason: String,
    },
}
