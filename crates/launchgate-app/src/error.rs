//! Runtime errors.

use launchgate_core::StoreError;
use thiserror::Error;

/// Errors that stop the [`crate::Runtime`].
#[derive(Debug, Error)]
pub enum RuntimeError<E: std::error::Error + 'static> {
    /// The driver failed.
    #[error("driver error: {0}")]
    Driver(#[source] E),

    /// The value store backend failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
