//! Byte-keyed seed stores
//!
//! The cache needs nothing more than an ordered key-value bucket with `get`
//! and an insert-if-absent `put`, so a stored record is never replaced.
//! [`RedbStore`] persists it in a single redb table; [`MemoryStore`] keeps it
//! in process for runs without a database.

use crate::constants::SEEDS_TABLE;
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

const SEEDS: TableDefinition<&[u8], &[u8]> = TableDefinition::new(SEEDS_TABLE);

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error reported by the redb engine
    #[error("database error: {0}")]
    Redb(#[from] redb::Error),

    /// A thread panicked while holding the in-memory store
    #[error("in-memory store lock poisoned")]
    Poisoned,
}

/// Ordered byte-keyed store holding one bucket of seed records
pub trait SeedStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store `value` under `key` unless the key already holds a value
    ///
    /// Returns the value already stored, in which case nothing was written.
    /// The check and the insert are atomic with respect to other `put` calls.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Number of stored records
    fn len(&self) -> Result<u64, StoreError>;
}

impl<T: SeedStore + ?Sized> SeedStore for Arc<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).put(key, value)
    }

    fn len(&self) -> Result<u64, StoreError> {
        (**self).len()
    }
}

impl<T: SeedStore + ?Sized> SeedStore for Box<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).put(key, value)
    }

    fn len(&self) -> Result<u64, StoreError> {
        (**self).len()
    }
}

// =============================================================================
// redb-backed store
// =============================================================================

/// Durable seed store in a single redb file
pub struct RedbStore {
    db: Database,
    path: PathBuf,
}

impl RedbStore {
    /// Open (or create) the database at `path` and make sure the seeds table exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let db = Self::open_db(&path)?;
        Ok(Self { db, path })
    }

    fn open_db(path: &Path) -> Result<Database, redb::Error> {
        let db = Database::create(path)?;
        let txn = db.begin_write()?;
        {
            txn.open_table(SEEDS)?;
        }
        txn.commit()?;
        Ok(db)
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self, key: &[u8]) -> Result<Option<Vec<u8>>, redb::Error> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(SEEDS)?;
        let value = table.get(key)?.map(|guard| guard.value().to_vec());
        Ok(value)
    }

    fn write(&self, key: &[u8], value: &[u8]) -> Result<Option<Vec<u8>>, redb::Error> {
        let txn = self.db.begin_write()?;
        let existing = {
            let mut table = txn.open_table(SEEDS)?;
            let existing = table.get(key)?.map(|guard| guard.value().to_vec());
            if existing.is_none() {
                table.insert(key, value)?;
            }
            existing
        };
        txn.commit()?;
        Ok(existing)
    }

    fn count(&self) -> Result<u64, redb::Error> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(SEEDS)?;
        Ok(table.len()?)
    }
}

impl SeedStore for RedbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.read(key)?)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.write(key, value)?)
    }

    fn len(&self) -> Result<u64, StoreError> {
        Ok(self.count()?)
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// In-process seed store
///
/// Records live only as long as the store. Reads and writes are counted so
/// callers can observe cache traffic.
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<BTreeMap<Vec<u8>, Vec<u8>>>,
    reads: AtomicU64,
    writes: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `get` calls served
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Number of `put` calls served, including ones that kept an existing value
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Snapshot of all stored keys, in order
    pub fn keys(&self) -> Result<Vec<Vec<u8>>, StoreError> {
        let map = self.map.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(map.keys().cloned().collect())
    }
}

impl SeedStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let map = self.map.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        let mut map = self.map.lock().map_err(|_| StoreError::Poisoned)?;
        match map.entry(key.to_vec()) {
            Entry::Occupied(existing) => Ok(Some(existing.get().clone())),
            Entry::Vacant(slot) => {
                slot.insert(value.to_vec());
                Ok(None)
            }
        }
    }

    fn len(&self) -> Result<u64, StoreError> {
        let map = self.map.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(map.len() as u64)
    }
}
