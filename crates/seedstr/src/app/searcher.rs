//! Seed search workflow
//!
//! This module brute-forces a seed whose generator output equals a target,
//! consulting the seed cache first and recording the outcome afterwards.
//!
//! The search space is split into one contiguous sub-range per worker. Each
//! worker scans its sub-range in ascending order and the first match reported
//! through the completion channel wins, so with more than one worker the
//! returned seed is *some* valid seed, not necessarily the smallest. This
//! trades determinism for throughput. With a single worker the result is the
//! smallest matching seed at or after the start seed.

use crate::constants::EMPTY_TARGET_SEED;
use crate::domain::byte_range::ByteRange;
use crate::domain::generator::{generate, matches_target};
use crate::domain::partition::{SearchRange, SearchSpace, partition};
use crate::domain::record::SeedRecord;
use crate::error::{Error, Result};
use crate::infra::seed_cache::SeedCache;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Outcome of a seed search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A seed regenerating the target
    Found(i64),
    /// No seed regenerates the target
    Unfindable,
}

impl Resolution {
    /// The seed, if one was found
    pub fn seed(&self) -> Option<i64> {
        match *self {
            Self::Found(seed) => Some(seed),
            Self::Unfindable => None,
        }
    }

    /// Check if a seed was found
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Per-call search options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FindOptions {
    /// First seed to try; anything above the space minimum makes the search partial
    pub start_seed: i64,
    /// Bytes the generator may produce; seeds yielding any other byte are pruned
    pub byte_range: ByteRange,
}

impl FindOptions {
    /// Full-range search starting at `start_seed`
    pub fn from_seed(start_seed: i64) -> Self {
        Self {
            start_seed,
            ..Self::default()
        }
    }

    /// Set the allowed byte range
    pub fn with_byte_range(mut self, byte_range: ByteRange) -> Self {
        self.byte_range = byte_range;
        self
    }
}

impl Default for FindOptions {
    fn default() -> Self {
        Self {
            start_seed: i64::MIN,
            byte_range: ByteRange::FULL,
        }
    }
}

/// What one worker reports when it stops
#[derive(Debug)]
struct WorkerReport {
    seed: Option<i64>,
    tried: u64,
}

/// Brute-force seed searcher backed by a [`SeedCache`]
pub struct SeedSearch {
    cache: SeedCache,
    pool: ThreadPool,
    workers: usize,
    space: SearchSpace,
    abort: Arc<AtomicBool>,
    generator_calls: AtomicU64,
}

impl SeedSearch {
    /// Create a searcher with `workers` concurrent workers over the full i64 space
    ///
    /// `workers == 0` is treated as 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerPool`] if the worker threads cannot be started.
    pub fn new(cache: SeedCache, workers: usize) -> Result<Self> {
        let workers = workers.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("seedstr-worker-{}", i))
            .build()?;

        Ok(Self {
            cache,
            pool,
            workers,
            space: SearchSpace::FULL,
            abort: Arc::new(AtomicBool::new(false)),
            generator_calls: AtomicU64::new(0),
        })
    }

    /// Restrict the searcher to `space`
    ///
    /// `space.min` becomes the true minimum: only searches starting there may
    /// record a target as unfindable.
    pub fn with_space(mut self, space: SearchSpace) -> Self {
        self.space = space;
        self
    }

    /// The seed cache
    pub fn cache(&self) -> &SeedCache {
        &self.cache
    }

    /// Number of workers per search
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// The configured search space
    pub fn space(&self) -> SearchSpace {
        self.space
    }

    /// Flag that stops every running and future search when set
    ///
    /// An aborted search that found nothing returns [`Error::Aborted`] and
    /// writes nothing to the cache. Store `false` to re-enable searching.
    pub fn abort_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    /// Total number of generator invocations made by this searcher
    pub fn generator_calls(&self) -> u64 {
        self.generator_calls.load(Ordering::Relaxed)
    }

    /// Find a seed regenerating `target`
    ///
    /// 1. The empty target resolves to seed 0 without touching the cache.
    /// 2. A cached record is returned as-is.
    /// 3. Otherwise the space from `options.start_seed` is searched; a verified
    ///    match is cached as Found, and exhaustion is cached as Unfindable only
    ///    if the search began at the true minimum. If another search stored a
    ///    record for the target in the meantime, that record is returned.
    ///
    /// Cache failures are logged and the call continues without the cache.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Aborted`] if the abort handle stopped the search
    /// before a seed was found.
    pub fn find(&self, target: &[u8], options: FindOptions) -> Result<Resolution> {
        if target.is_empty() {
            return Ok(Resolution::Found(EMPTY_TARGET_SEED));
        }

        if !options.byte_range.contains_all(target) {
            debug!(
                "\"{}\" has bytes outside {:#04x}..={:#04x}; no seed can match",
                target.escape_ascii(),
                options.byte_range.lo,
                options.byte_range.hi
            );
            return Ok(Resolution::Unfindable);
        }

        match self.cache.get(target) {
            Ok(SeedRecord::Found(seed)) => {
                debug!("Cache hit for \"{}\": {}", target.escape_ascii(), seed);
                return Ok(Resolution::Found(seed));
            }
            Ok(SeedRecord::Unfindable) => {
                debug!("Cache hit for \"{}\": unfindable", target.escape_ascii());
                return Ok(Resolution::Unfindable);
            }
            Ok(SeedRecord::Absent) => {}
            Err(e) => warn!(
                "Unable to check cache for \"{}\", searching without it: {}",
                target.escape_ascii(),
                e
            ),
        }

        let range = self.space.range_from(options.start_seed);
        let started = Instant::now();
        let found = self.search_range(target, range, options.byte_range)?;

        match found {
            Some(seed) => {
                if generate(seed, target.len()) != target {
                    error!(
                        "Seed {} failed verification for \"{}\"; not caching",
                        seed,
                        target.escape_ascii()
                    );
                    return Ok(Resolution::Unfindable);
                }
                info!(
                    "Found \"{}\" -> {} in {:.3?}",
                    target.escape_ascii(),
                    seed,
                    started.elapsed()
                );
                Ok(self.record(target, SeedRecord::Found(seed)))
            }
            None => {
                if self.space.starts_at_min(options.start_seed) {
                    info!("No seed found for \"{}\"", target.escape_ascii());
                    return Ok(self.record(target, SeedRecord::Unfindable));
                }
                info!(
                    "No seed found for \"{}\" from {}; partial search, not cached",
                    target.escape_ascii(),
                    options.start_seed
                );
                Ok(Resolution::Unfindable)
            }
        }
    }

    /// Store `record` and return what the cache holds afterwards
    ///
    /// A record written by a concurrent search wins over `record`, so every
    /// caller reports the same seed for a target.
    fn record(&self, target: &[u8], record: SeedRecord) -> Resolution {
        let kept = match self.cache.put(target, record) {
            Ok(kept) => {
                if kept != record {
                    debug!(
                        "Keeping cached {:?} for \"{}\" instead of {:?}",
                        kept,
                        target.escape_ascii(),
                        record
                    );
                }
                kept
            }
            Err(e) => {
                warn!(
                    "Unable to store {:?} for \"{}\" in cache: {}",
                    record,
                    target.escape_ascii(),
                    e
                );
                record
            }
        };

        match kept {
            SeedRecord::Found(seed) => Resolution::Found(seed),
            SeedRecord::Unfindable | SeedRecord::Absent => Resolution::Unfindable,
        }
    }

    /// Scan `range` with one worker per sub-range, bypassing the cache
    ///
    /// Blocks until every worker has stopped. Returns the first reported
    /// match, or `None` if the range was exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Aborted`] if the abort handle was raised and no match
    /// was reported.
    pub fn search_range(
        &self,
        target: &[u8],
        range: SearchRange,
        byte_range: ByteRange,
    ) -> Result<Option<i64>> {
        let ranges = partition(range, self.workers);
        debug!(
            "Starting {} workers over [{}, {}] for \"{}\"",
            ranges.len(),
            range.from,
            range.to,
            target.escape_ascii()
        );

        let stop = AtomicBool::new(false);
        let (tx, rx) = mpsc::channel();

        self.pool.scope(|s| {
            for (worker, sub) in ranges.iter().copied().enumerate() {
                let tx = tx.clone();
                let stop = &stop;
                let abort = self.abort.as_ref();
                s.spawn(move |_| {
                    let report = scan_range(worker, sub, target, byte_range, stop, abort);
                    // The receiver outlives the scope
                    let _ = tx.send(report);
                });
            }
        });
        drop(tx);

        let mut winner = None;
        for report in rx {
            self.generator_calls.fetch_add(report.tried, Ordering::Relaxed);
            if winner.is_none() {
                winner = report.seed;
            }
        }

        if winner.is_none() && self.abort.load(Ordering::Relaxed) {
            return Err(Error::Aborted);
        }
        Ok(winner)
    }
}

/// Scan one sub-range in ascending order
///
/// Stops at the first match (raising `stop` for its siblings), when `stop` or
/// `abort` is observed, or when the sub-range is exhausted.
fn scan_range(
    worker: usize,
    range: SearchRange,
    target: &[u8],
    byte_range: ByteRange,
    stop: &AtomicBool,
    abort: &AtomicBool,
) -> WorkerReport {
    debug!("Worker {} working from {} to {}", worker, range.from, range.to);

    let mut tried = 0u64;
    for seed in range.from..=range.to {
        if stop.load(Ordering::Relaxed) || abort.load(Ordering::Relaxed) {
            break;
        }
        tried += 1;
        if matches_target(seed, target, byte_range) {
            stop.store(true, Ordering::Relaxed);
            return WorkerReport {
                seed: Some(seed),
                tried,
            };
        }
    }

    WorkerReport { seed: None, tried }
}
