//! Launch value store.
//!
//! Persists the reference point (the destination treated as the native
//! interface), an optional resume point remembered from an earlier session,
//! and an opaque list of mark records. Everything lives in a string-keyed
//! [`Storage`] backend; the backend decides durability.
//!
//! Absent keys and malformed values are ordinary empty states. Only backend
//! failures are reported as [`StoreError`].

use std::{
    collections::{BTreeMap, HashMap},
    sync::LazyLock,
};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::StoreError;

/// Reference point used on first run and after [`ValueStore::reset_all`].
pub const DEFAULT_REFERENCE_POINT: &str = "https://yarakselim.github.io/roadrprivacy/";

/// Storage keys used by the launch store and session tracker.
#[derive(Debug, Clone, Copy)]
pub struct StoreKeys;

impl StoreKeys {
    /// Reference point URL string.
    pub const REFERENCE: &'static str = "launch.reference";
    /// Resume point URL string.
    pub const RESUME: &'static str = "launch.resume";
    /// Opaque mark records.
    pub const MARKS: &'static str = "launch.marks";
    /// Last point the surface was showing.
    pub const LAST_POINT: &'static str = "session.last_point";
}

/// One opaque mark record. Passed through uninterpreted.
pub type Mark = BTreeMap<String, ciborium::Value>;

/// A value held by a [`Storage`] backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoredValue {
    /// A single string.
    Text(String),
    /// A list of string-keyed records.
    Records(Vec<Mark>),
}

impl StoredValue {
    /// Encode as CBOR for byte-oriented backends.
    pub fn encode(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let mut bytes = Vec::new();
        ciborium::into_writer(self, &mut bytes)
            .map_err(|e| StoreError::Codec { key: key.to_string(), reason: e.to_string() })?;
        Ok(bytes)
    }

    /// Decode from CBOR produced by [`StoredValue::encode`].
    pub fn decode(key: &str, bytes: &[u8]) -> Result<Self, StoreError> {
        ciborium::from_reader(bytes)
            .map_err(|e| StoreError::Codec { key: key.to_string(), reason: e.to_string() })
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Records(_) => None,
        }
    }
}

/// String-keyed durable storage.
pub trait Storage {
    /// Read the value under `key`.
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: StoredValue) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory storage for tests and ephemeral hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, StoredValue>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: StoredValue) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Read the value under `key`. Undecodable bytes read as absent.
fn read_value<S: Storage + ?Sized>(storage: &S, key: &str) -> Result<Option<StoredValue>, StoreError> {
    match storage.get(key) {
        Err(StoreError::Codec { reason, .. }) => {
            tracing::warn!(key, reason = %reason, "stored value is undecodable, treating as absent");
            Ok(None)
        },
        other => other,
    }
}

/// Read a URL stored as text under `key`. Malformed values read as absent.
pub(crate) fn read_point<S: Storage + ?Sized>(
    storage: &S,
    key: &str,
) -> Result<Option<Url>, StoreError> {
    let Some(value) = read_value(storage, key)? else {
        return Ok(None);
    };
    let Some(text) = value.as_text() else {
        tracing::warn!(key, "stored point is not text, treating as absent");
        return Ok(None);
    };

    match Url::parse(text) {
        Ok(point) => Ok(Some(point)),
        Err(e) => {
            tracing::warn!(key, value = text, error = %e, "stored point is malformed, treating as absent");
            Ok(None)
        },
    }
}

#[allow(clippy::expect_used, reason = "the constant is a valid absolute URL")]
static DEFAULT_REFERENCE: LazyLock<Url> = LazyLock::new(|| {
    Url::parse(DEFAULT_REFERENCE_POINT).expect("default reference point is a valid URL")
});

fn default_reference_point() -> Url {
    DEFAULT_REFERENCE.clone()
}

/// Reference point, resume point and marks over a [`Storage`] backend.
#[derive(Debug)]
pub struct ValueStore<S> {
    storage: S,
    reference: Url,
    resume_stored: bool,
}

impl<S: Storage> ValueStore<S> {
    /// Load the store.
    ///
    /// A missing or malformed reference point falls back to
    /// [`DEFAULT_REFERENCE_POINT`], which is persisted immediately.
    pub fn open(mut storage: S) -> Result<Self, StoreError> {
        let reference = match read_point(&storage, StoreKeys::REFERENCE)? {
            Some(point) => point,
            None => {
                let point = default_reference_point();
                storage.put(StoreKeys::REFERENCE, StoredValue::Text(point.as_str().to_string()))?;
                tracing::debug!(reference = point.as_str(), "persisted default reference point");
                point
            },
        };

        Ok(Self { storage, reference, resume_stored: false })
    }

    /// Canonical "home" destination.
    pub fn reference_point(&self) -> &Url {
        &self.reference
    }

    /// Replace the reference point.
    ///
    /// Unparseable values are ignored. Returns whether the value was accepted.
    pub fn set_reference_point(&mut self, value: &str) -> Result<bool, StoreError> {
        let point = match Url::parse(value) {
            Ok(point) => point,
            Err(e) => {
                tracing::debug!(value, error = %e, "rejected reference point");
                return Ok(false);
            },
        };

        self.storage.put(StoreKeys::REFERENCE, StoredValue::Text(value.to_string()))?;
        self.reference = point;
        Ok(true)
    }

    /// Remember `point` as the resume point.
    ///
    /// Writes at most once per store lifetime, and never over a resume point
    /// persisted by an earlier session. Returns whether it was written.
    pub fn store_resume_point_once(&mut self, point: &Url) -> Result<bool, StoreError> {
        if self.resume_stored {
            return Ok(false);
        }
        self.resume_stored = true;

        if read_point(&self.storage, StoreKeys::RESUME)?.is_some() {
            return Ok(false);
        }

        self.storage.put(StoreKeys::RESUME, StoredValue::Text(point.as_str().to_string()))?;
        tracing::debug!(resume = point.as_str(), "stored resume point");
        Ok(true)
    }

    /// Resume point remembered from an earlier session.
    pub fn resume_point(&self) -> Result<Option<Url>, StoreError> {
        read_point(&self.storage, StoreKeys::RESUME)
    }

    /// Where the embedded surface should start: the resume point if one is
    /// stored, otherwise the reference point.
    pub fn starting_point(&self) -> Result<Url, StoreError> {
        Ok(self.resume_point()?.unwrap_or_else(|| self.reference.clone()))
    }

    /// Replace the stored mark records.
    pub fn save_marks(&mut self, marks: Vec<Mark>) -> Result<(), StoreError> {
        self.storage.put(StoreKeys::MARKS, StoredValue::Records(marks))
    }

    /// Stored mark records, if any.
    pub fn load_marks(&self) -> Result<Option<Vec<Mark>>, StoreError> {
        match read_value(&self.storage, StoreKeys::MARKS)? {
            Some(StoredValue::Records(marks)) => Ok(Some(marks)),
            Some(StoredValue::Text(_)) => {
                tracing::warn!(key = StoreKeys::MARKS, "stored marks are not records, treating as absent");
                Ok(None)
            },
            None => Ok(None),
        }
    }

    /// Clear every persisted key and the resume latch.
    ///
    /// The in-memory reference point returns to the default; it is persisted
    /// again the next time a store is opened.
    pub fn reset_all(&mut self) -> Result<(), StoreError> {
        self.storage.remove(StoreKeys::REFERENCE)?;
        self.storage.remove(StoreKeys::RESUME)?;
        self.storage.remove(StoreKeys::MARKS)?;
        self.storage.remove(StoreKeys::LAST_POINT)?;
        self.resume_stored = false;
        self.reference = default_reference_point();
        tracing::debug!("launch store reset");
        Ok(())
    }

    /// Underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Underlying storage, mutably.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Give back the underlying storage.
    pub fn into_storage(self) -> S {
        self.storage
    }
}
