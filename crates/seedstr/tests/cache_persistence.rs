//! Seed cache persistence tests
//!
//! End-to-end checks of how search results reach the store:
//!
//! - Found seeds and Unfindable markers survive reopening a redb file
//! - Unfindable is recorded only after a search from the space minimum
//! - Concurrent searches never replace a stored seed
//! - A failing store degrades to uncached searching

use seedstr::domain::record::SeedRecord;
use seedstr::{
    Error, FindOptions, MAX_KEY_SIZE, MemoryStore, Resolution, SearchSpace, SeedCache,
    SeedSearch, SeedStore, StoreError, generate,
};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

/// Space small enough to exhaust in a test
const NARROW: SearchSpace = SearchSpace { min: 0, max: 1000 };

/// A four-byte string no seed in `NARROW` produces
fn unproduced_target() -> Vec<u8> {
    let mut target = b"zzzz".to_vec();
    while (NARROW.min..=NARROW.max).any(|s| generate(s, 4) == target) {
        target[0] -= 1;
    }
    target
}

/// Store whose every call fails
struct FailingStore;

impl SeedStore for FailingStore {
    fn get(&self, _key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Err(StoreError::Poisoned)
    }

    fn put(&self, _key: &[u8], _value: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Err(StoreError::Poisoned)
    }

    fn len(&self) -> Result<u64, StoreError> {
        Err(StoreError::Poisoned)
    }
}

/// Store whose lookups are slow, so concurrent searches both miss the cache
struct SlowLookupStore {
    inner: Arc<MemoryStore>,
}

impl SeedStore for SlowLookupStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        thread::sleep(Duration::from_millis(200));
        self.inner.get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.put(key, value)
    }

    fn len(&self) -> Result<u64, StoreError> {
        self.inner.len()
    }
}

// =============================================================================
// Unfindable recording
// =============================================================================

#[test]
fn test_full_search_records_unfindable() {
    let search = SeedSearch::new(SeedCache::in_memory(), 3)
        .expect("Failed to build worker pool")
        .with_space(NARROW);
    let target = unproduced_target();

    let first = search
        .find(&target, FindOptions::default())
        .expect("search failed");
    assert_eq!(first, Resolution::Unfindable);
    assert_eq!(search.cache().get(&target).unwrap(), SeedRecord::Unfindable);

    let calls = search.generator_calls();
    let second = search
        .find(&target, FindOptions::default())
        .expect("search failed");
    assert_eq!(second, Resolution::Unfindable);
    assert_eq!(search.generator_calls(), calls);
}

#[test]
fn test_partial_search_does_not_record_unfindable() {
    let search = SeedSearch::new(SeedCache::in_memory(), 2)
        .expect("Failed to build worker pool")
        .with_space(NARROW);
    let target = unproduced_target();

    let result = search
        .find(&target, FindOptions::from_seed(500))
        .expect("search failed");
    assert_eq!(result, Resolution::Unfindable);
    assert_eq!(search.cache().get(&target).unwrap(), SeedRecord::Absent);
    assert_eq!(search.generator_calls(), 501);
}

// =============================================================================
// redb persistence
// =============================================================================

#[test]
fn test_found_seed_survives_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("seeds.redb");

    let seed = {
        let cache = SeedCache::open(&db_path).expect("Failed to open cache");
        let search = SeedSearch::new(cache, 2).expect("Failed to build worker pool");
        search
            .find(b"hey", FindOptions::from_seed(0))
            .expect("search failed")
            .seed()
            .expect("three-byte target should be found")
    };

    let cache = SeedCache::open(&db_path).expect("Failed to reopen cache");
    assert_eq!(cache.len().unwrap(), 1);
    let search = SeedSearch::new(cache, 2).expect("Failed to build worker pool");
    let again = search
        .find(b"hey", FindOptions::from_seed(0))
        .expect("search failed");
    assert_eq!(again, Resolution::Found(seed));
    assert_eq!(search.generator_calls(), 0);
}

#[test]
fn test_unfindable_survives_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("seeds.redb");
    let target = unproduced_target();

    {
        let cache = SeedCache::open(&db_path).expect("Failed to open cache");
        let search = SeedSearch::new(cache, 2)
            .expect("Failed to build worker pool")
            .with_space(NARROW);
        search
            .find(&target, FindOptions::default())
            .expect("search failed");
    }

    let cache = SeedCache::open(&db_path).expect("Failed to reopen cache");
    assert_eq!(cache.get(&target).unwrap(), SeedRecord::Unfindable);
}

#[test]
fn test_oversized_target_round_trips() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("seeds.redb");
    let long = vec![b'x'; MAX_KEY_SIZE + 10];
    let longer = vec![b'x'; MAX_KEY_SIZE + 11];

    {
        let cache = SeedCache::open(&db_path).expect("Failed to open cache");
        cache.put(&long, SeedRecord::Found(-7)).unwrap();
    }

    let cache = SeedCache::open(&db_path).expect("Failed to reopen cache");
    assert_eq!(cache.get(&long).unwrap(), SeedRecord::Found(-7));
    assert_eq!(cache.get(&longer).unwrap(), SeedRecord::Absent);
}

#[test]
fn test_open_in_missing_directory_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("missing").join("seeds.redb");

    let result = SeedCache::open(&db_path);
    assert!(matches!(result, Err(Error::StoreUnavailable { .. })));
}

// =============================================================================
// Concurrent writers
// =============================================================================

#[test]
fn test_concurrent_finds_agree_on_first_stored_seed() {
    let shared = Arc::new(MemoryStore::new());
    let searcher = || {
        let store = SlowLookupStore {
            inner: Arc::clone(&shared),
        };
        SeedSearch::new(SeedCache::new(store), 1).expect("Failed to build worker pool")
    };
    let low = searcher();
    let high = searcher();

    let (a, b) = thread::scope(|s| {
        let a = s.spawn(|| low.find(b"q", FindOptions::from_seed(0)));
        let b = s.spawn(|| high.find(b"q", FindOptions::from_seed(1_000_000_000)));
        (a.join().unwrap(), b.join().unwrap())
    });
    let a = a.expect("search failed");
    let b = b.expect("search failed");

    // Both searched, since each missed the cache before either wrote
    assert!(low.generator_calls() > 0);
    assert!(high.generator_calls() > 0);

    assert_eq!(a, b);
    assert_eq!(shared.len().unwrap(), 1);
    let cached = SeedCache::new(Arc::clone(&shared)).get(b"q").unwrap();
    assert_eq!(cached, SeedRecord::Found(a.seed().expect("one-byte target should be found")));
}

// =============================================================================
// Degraded store
// =============================================================================

#[test]
fn test_failing_store_degrades_to_search() {
    let search = SeedSearch::new(SeedCache::new(FailingStore), 2).expect("Failed to build worker pool");

    let first = search
        .find(b"q", FindOptions::from_seed(0))
        .expect("search should not fail on store errors");
    let seed = first.seed().expect("one-byte target should be found");
    assert_eq!(generate(seed, 1), b"q");

    let calls = search.generator_calls();
    search
        .find(b"q", FindOptions::from_seed(0))
        .expect("search should not fail on store errors");
    assert!(search.generator_calls() > calls);
}
