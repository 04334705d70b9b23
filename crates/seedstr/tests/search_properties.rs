//! Seed search property tests
//!
//! Randomized checks of the search contract against an in-memory cache:
//!
//! - A search starting at `s` for `generate(s, n)` returns `s` immediately
//! - A repeated search is answered from the cache
//! - Partitions cover the seed space exactly

use rand::Rng;
use seedstr::domain::partition::partition;
use seedstr::{
    ByteRange, FindOptions, Resolution, SearchRange, SearchSpace, SeedCache, SeedSearch,
    generate,
};

// =============================================================================
// Helpers
// =============================================================================

fn single_worker() -> SeedSearch {
    SeedSearch::new(SeedCache::in_memory(), 1).expect("Failed to build worker pool")
}

// =============================================================================
// Search properties
// =============================================================================

#[test]
fn test_start_seed_output_is_found_first() {
    let mut rng = rand::thread_rng();

    for _ in 0..50 {
        let seed: i64 = rng.r#gen();
        let len = rng.gen_range(1..=8);
        let target = generate(seed, len);

        let search = single_worker();
        let result = search
            .find(&target, FindOptions::from_seed(seed))
            .expect("search failed");

        assert_eq!(result, Resolution::Found(seed), "seed={seed}, len={len}");
        assert_eq!(search.generator_calls(), 1);
    }
}

#[test]
fn test_repeated_find_is_idempotent() {
    let mut rng = rand::thread_rng();
    let search = SeedSearch::new(SeedCache::in_memory(), 4).expect("Failed to build worker pool");

    for _ in 0..20 {
        let seed: i64 = rng.r#gen();
        let target = generate(seed, 3);
        let options = FindOptions::from_seed(seed);

        let first = search.find(&target, options).expect("search failed");
        let calls = search.generator_calls();
        let second = search.find(&target, options).expect("search failed");

        assert_eq!(first, second);
        assert_eq!(search.generator_calls(), calls);
        let found = first.seed().expect("target should be found");
        assert_eq!(generate(found, target.len()), target);
    }
}

#[test]
fn test_any_worker_count_returns_valid_seed() {
    for workers in [1, 2, 3, 8] {
        let search =
            SeedSearch::new(SeedCache::in_memory(), workers).expect("Failed to build worker pool");
        let target = b"ok";

        let result = search
            .find(target, FindOptions::from_seed(0))
            .expect("search failed");
        let seed = result.seed().expect("two-byte target should be found");
        assert_eq!(generate(seed, 2), target, "workers={workers}");
    }
}

#[test]
fn test_lowercase_scenario() {
    let search = single_worker();
    let options = FindOptions::from_seed(0).with_byte_range(ByteRange::LOWERCASE);

    let result = search.find(b"ab", options).expect("search failed");
    assert_eq!(result, Resolution::Found(21510));
}

#[test]
fn test_narrow_space_search_range_is_exhaustive() {
    let search = single_worker().with_space(SearchSpace::new(-500, 500));
    let target = generate(123, 1);

    let found = search
        .search_range(&target, SearchRange::new(-500, 500), ByteRange::FULL)
        .expect("search failed")
        .expect("target produced by a seed in range");
    assert!((-500..=123).contains(&found));
    assert_eq!(generate(found, 1), target);
}

// =============================================================================
// Partition properties
// =============================================================================

#[test]
fn test_partition_covers_random_ranges() {
    let mut rng = rand::thread_rng();

    for _ in 0..200 {
        let a: i64 = rng.r#gen();
        let b: i64 = rng.r#gen();
        let range = SearchRange::new(a.min(b), a.max(b));
        let workers = rng.gen_range(1..=64);

        let parts = partition(range, workers);
        assert!(!parts.is_empty());
        assert!(parts.len() <= workers);
        assert_eq!(parts[0].from, range.from);
        assert_eq!(parts[parts.len() - 1].to, range.to);
        for pair in parts.windows(2) {
            assert_eq!(pair[0].to as i128 + 1, pair[1].from as i128);
        }
        let total: u128 = parts.iter().map(SearchRange::len).sum();
        assert_eq!(total, range.len());
    }
}

#[test]
fn test_partition_full_space_any_worker_count() {
    let full = SearchSpace::FULL.range_from(i64::MIN);

    for workers in 1..=32 {
        let parts = partition(full, workers);
        assert_eq!(parts.len(), workers);
        let total: u128 = parts.iter().map(SearchRange::len).sum();
        assert_eq!(total, 1u128 << 64);
    }
}
