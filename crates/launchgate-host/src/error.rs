//! Host error types.

use launchgate_app::RuntimeError;
use launchgate_core::StoreError;
use thiserror::Error;

/// Errors raised by the headless host.
#[derive(Debug, Error)]
pub enum HostError {
    /// The redb database failed.
    #[error("database error: {0}")]
    Database(#[from] redb::Error),

    /// The value store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A surface script entry could not be parsed.
    #[error("invalid script entry {entry:?}: {reason}")]
    Script {
        /// The offending entry.
        entry: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Writing command output failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RuntimeError<HostError>> for HostError {
    fn from(err: RuntimeError<HostError>) -> Self {
        match err {
            RuntimeError::Driver(inner) => inner,
            RuntimeError::Store(inner) => Self::Store(inner),
        }
    }
}
