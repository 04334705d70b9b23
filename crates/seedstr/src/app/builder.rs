//! Offline cache precomputation
//!
//! Enumerates every string of a fixed length over a byte range and runs the
//! full search for each one that is not cached yet. Already cached strings
//! are skipped, so an interrupted build resumes where it stopped.

use crate::app::searcher::{FindOptions, Resolution, SeedSearch};
use crate::domain::byte_range::ByteRange;
use crate::domain::odometer::{count_strings, increment};
use crate::error::{Error, Result};
use std::sync::atomic::Ordering;
use tracing::{debug, info, warn};

/// Progress of a running build
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildProgress {
    /// Candidates processed so far
    pub done: u64,
    /// Candidates in the whole enumeration
    pub total: u64,
    /// Candidates skipped because they were already cached
    pub skipped: u64,
    /// Candidates resolved to a seed by this build
    pub found: u64,
    /// Candidates proven unfindable by this build
    pub unfindable: u64,
}

impl BuildProgress {
    /// Candidates that required a search
    pub fn searched(&self) -> u64 {
        self.found + self.unfindable
    }
}

/// Final counters of a finished build
pub type BuildSummary = BuildProgress;

/// Batch builder filling a searcher's cache
pub struct DatabaseBuilder<'a> {
    search: &'a SeedSearch,
}

impl<'a> DatabaseBuilder<'a> {
    /// Create a builder that searches and caches through `search`
    pub fn new(search: &'a SeedSearch) -> Self {
        Self { search }
    }

    /// Search every `length`-byte string over `range`, starting at `start_seed`
    ///
    /// Strings are visited in odometer order. `on_progress` is called after
    /// every candidate.
    ///
    /// # Arguments
    ///
    /// * `length` - Length of the enumerated strings
    /// * `range` - Byte range of every position
    /// * `start_seed` - First seed tried for each string
    /// * `on_progress` - Callback receiving the running counters
    ///
    /// # Errors
    ///
    /// Returns [`Error::Aborted`] if the searcher's abort handle was raised,
    /// including between two candidates.
    pub fn build<F>(
        &self,
        length: usize,
        range: ByteRange,
        start_seed: i64,
        mut on_progress: F,
    ) -> Result<BuildSummary>
    where
        F: FnMut(&BuildProgress),
    {
        let mut progress = BuildProgress {
            total: count_strings(length, range),
            ..BuildProgress::default()
        };
        if length == 0 {
            return Ok(progress);
        }

        info!(
            "Building {} strings of length {} over {:#04x}..={:#04x}",
            progress.total, length, range.lo, range.hi
        );

        let options = FindOptions::from_seed(start_seed).with_byte_range(range);
        let abort = self.search.abort_handle();
        let mut candidate = vec![range.lo; length];

        loop {
            if abort.load(Ordering::Relaxed) {
                return Err(Error::Aborted);
            }

            let cached = match self.search.cache().contains(&candidate) {
                Ok(cached) => cached,
                Err(e) => {
                    warn!(
                        "Unable to check cache for \"{}\": {}",
                        candidate.escape_ascii(),
                        e
                    );
                    false
                }
            };

            if cached {
                debug!("Skipping cached \"{}\"", candidate.escape_ascii());
                progress.skipped += 1;
            } else {
                match self.search.find(&candidate, options)? {
                    Resolution::Found(_) => progress.found += 1,
                    Resolution::Unfindable => progress.unfindable += 1,
                }
            }

            progress.done += 1;
            on_progress(&progress);

            if increment(&mut candidate, range) {
                break;
            }
        }

        info!(
            "Build finished: {} searched, {} skipped, {} unfindable",
            progress.searched(),
            progress.skipped,
            progress.unfindable
        );
        Ok(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::SeedRecord;
    use crate::infra::seed_cache::SeedCache;

    fn searcher() -> SeedSearch {
        SeedSearch::new(SeedCache::in_memory(), 2).unwrap()
    }

    #[test]
    fn test_build_printable_single_bytes() {
        let search = searcher();
        let builder = DatabaseBuilder::new(&search);

        let summary = builder.build(1, ByteRange::PRINTABLE, 0, |_| {}).unwrap();
        assert_eq!(summary.total, 95);
        assert_eq!(summary.done, 95);
        assert_eq!(summary.found, 95);
        assert_eq!(summary.skipped, 0);
        assert_eq!(search.cache().len().unwrap(), 95);

        for b in 0x20u8..=0x7e {
            assert!(matches!(search.cache().get(&[b]).unwrap(), SeedRecord::Found(_)));
        }
    }

    #[test]
    fn test_rebuild_skips_cached() {
        let search = searcher();
        let builder = DatabaseBuilder::new(&search);
        builder.build(1, ByteRange::PRINTABLE, 0, |_| {}).unwrap();

        let calls = search.generator_calls();
        let summary = builder.build(1, ByteRange::PRINTABLE, 0, |_| {}).unwrap();
        assert_eq!(summary.skipped, 95);
        assert_eq!(summary.searched(), 0);
        assert_eq!(search.generator_calls(), calls);
    }

    #[test]
    fn test_progress_is_reported_in_order() {
        let search = searcher();
        let builder = DatabaseBuilder::new(&search);

        let mut seen = Vec::new();
        builder
            .build(2, ByteRange::new(b'a', b'c'), 0, |p| seen.push(p.done))
            .unwrap();
        assert_eq!(seen, (1..=9).collect::<Vec<u64>>());
    }

    #[test]
    fn test_build_zero_length() {
        let search = searcher();
        let builder = DatabaseBuilder::new(&search);

        let summary = builder.build(0, ByteRange::FULL, 0, |_| {}).unwrap();
        assert_eq!(summary.done, 0);
        assert_eq!(search.cache().len().unwrap(), 0);
    }

    #[test]
    fn test_build_aborted() {
        let search = searcher();
        search.abort_handle().store(true, Ordering::Relaxed);
        let builder = DatabaseBuilder::new(&search);

        let result = builder.build(1, ByteRange::LOWERCASE, 0, |_| {});
        assert!(matches!(result, Err(Error::Aborted)));
    }
}
