//! Durable key-value storage backed by redb.
//!
//! Each key maps to a CBOR-encoded [`StoredValue`] in a single table. Every
//! write commits its own transaction, so a value is durable once `put`
//! returns.

use std::path::Path;

use launchgate_core::{Storage, StoreError, StoredValue};
use redb::{Database, TableDefinition};

use crate::HostError;

const ENTRIES: TableDefinition<&str, &[u8]> = TableDefinition::new("launch_entries");

fn backend(err: impl Into<redb::Error>) -> StoreError {
    StoreError::Backend(err.into().to_string())
}

/// redb-backed [`Storage`].
pub struct RedbStorage {
    db: Database,
}

impl RedbStorage {
    /// Open or create the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let db = Database::create(path.as_ref()).map_err(redb::Error::from)?;

        // Create the table up front so read transactions never miss it.
        let txn = db.begin_write().map_err(redb::Error::from)?;
        txn.open_table(ENTRIES).map_err(redb::Error::from)?;
        txn.commit().map_err(redb::Error::from)?;

        tracing::debug!(path = %path.as_ref().display(), "opened launch database");
        Ok(Self { db })
    }
}

impl Storage for RedbStorage {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        let txn = self.db.begin_read().map_err(backend)?;
        let table = txn.open_table(ENTRIES).map_err(backend)?;
        match table.get(key).map_err(backend)? {
            Some(bytes) => StoredValue::decode(key, bytes.value()).map(Some),
            None => Ok(None),
        }
    }

    fn put(&mut self, key: &str, value: StoredValue) -> Result<(), StoreError> {
        let bytes = value.encode(key)?;
        let txn = self.db.begin_write().map_err(backend)?;
        {
            let mut table = txn.open_table(ENTRIES).map_err(backend)?;
            table.insert(key, bytes.as_slice()).map_err(backend)?;
        }
        txn.commit().map_err(backend)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let txn = self.db.begin_write().map_err(backend)?;
        {
            let mut table = txn.open_table(ENTRIES).map_err(backend)?;
            table.remove(key).map_err(backend)?;
        }
        txn.commit().map_err(backend)
    }
}
