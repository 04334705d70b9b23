//! Seed cache
//!
//! Maps a target's fingerprint to a [`SeedRecord`]. The cache is append-only:
//! a record is written once a search has finished and is never replaced.

use crate::domain::fingerprint::Fingerprint;
use crate::domain::record::SeedRecord;
use crate::error::{Error, Result};
use crate::infra::store::{MemoryStore, RedbStore, SeedStore};
use std::path::Path;
use tracing::warn;

/// Persistent target → seed cache
pub struct SeedCache {
    store: Box<dyn SeedStore>,
}

impl SeedCache {
    /// Wrap an already opened store
    pub fn new(store: impl SeedStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Open the redb database at `path`
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if the file cannot be opened or the
    /// seeds table cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let store = RedbStore::open(path).map_err(|e| Error::store_unavailable(path, e))?;
        Ok(Self::new(store))
    }

    /// Create a cache that lives only for this process
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Look up the record for `target`
    ///
    /// An undecodable stored value is logged and reported as `Absent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the store read fails.
    pub fn get(&self, target: &[u8]) -> Result<SeedRecord> {
        let key = Fingerprint::of(target).to_key();
        let Some(value) = self.store.get(&key)? else {
            return Ok(SeedRecord::Absent);
        };

        match SeedRecord::decode(&value) {
            Some(record) => Ok(record),
            None => {
                let err = Error::CorruptRecord { len: value.len() };
                warn!("Ignoring cached value for \"{}\": {}", target.escape_ascii(), err);
                Ok(SeedRecord::Absent)
            }
        }
    }

    /// Check whether `target` already has a Found or Unfindable record
    pub fn contains(&self, target: &[u8]) -> Result<bool> {
        Ok(self.get(target)? != SeedRecord::Absent)
    }

    /// Store the record for `target` unless one is already stored
    ///
    /// Returns the record the cache holds afterwards: the existing one if
    /// another writer got there first, otherwise `record`. Storing `Absent`
    /// is a no-op and returns `Absent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the store write fails.
    pub fn put(&self, target: &[u8], record: SeedRecord) -> Result<SeedRecord> {
        let Some(value) = record.encode() else {
            return Ok(SeedRecord::Absent);
        };
        let key = Fingerprint::of(target).to_key();
        let Some(existing) = self.store.put(&key, &value)? else {
            return Ok(record);
        };

        match SeedRecord::decode(&existing) {
            Some(kept) => Ok(kept),
            None => {
                let err = Error::CorruptRecord { len: existing.len() };
                warn!(
                    "Not replacing cached value for \"{}\": {}",
                    target.escape_ascii(),
                    err
                );
                Ok(record)
            }
        }
    }

    /// Number of records in the cache
    pub fn len(&self) -> Result<u64> {
        Ok(self.store.len()?)
    }

    /// Check if the cache holds no records
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
