//! Seed space partitioning
//!
//! The search space is split into contiguous closed ranges, one per worker.

/// Closed interval `[from, to]` of seeds assigned to one worker
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchRange {
    /// First seed (inclusive)
    pub from: i64,
    /// Last seed (inclusive)
    pub to: i64,
}

impl SearchRange {
    /// Create a new range
    pub fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    /// Number of seeds in the range
    pub fn len(&self) -> u128 {
        (self.to as i128 - self.from as i128 + 1).max(0) as u128
    }

    /// Check if the range holds no seeds
    pub fn is_empty(&self) -> bool {
        self.to < self.from
    }

    /// Check whether `seed` lies within the range
    pub fn contains(&self, seed: i64) -> bool {
        self.from <= seed && seed <= self.to
    }
}

/// The closed interval of seeds a searcher may try
///
/// `min` is the "true minimum": only a search that started there may declare
/// a target unfindable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchSpace {
    /// Smallest seed in the space
    pub min: i64,
    /// Largest seed in the space
    pub max: i64,
}

impl SearchSpace {
    /// The whole signed 64-bit space
    pub const FULL: Self = Self {
        min: i64::MIN,
        max: i64::MAX,
    };

    /// Create a space, swapping the bounds if given in reverse
    pub fn new(min: i64, max: i64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// The range a search starting at `start` covers
    ///
    /// Starts below `min` are clamped to `min`.
    pub fn range_from(&self, start: i64) -> SearchRange {
        SearchRange::new(start.max(self.min), self.max)
    }

    /// Check whether a search starting at `start` begins at the true minimum
    pub fn starts_at_min(&self, start: i64) -> bool {
        start <= self.min
    }
}

impl Default for SearchSpace {
    fn default() -> Self {
        Self::FULL
    }
}

/// Split `range` into at most `workers` contiguous sub-ranges
///
/// Each sub-range holds `ceil(len / workers)` seeds except the last, which
/// absorbs the remainder. When `range` holds fewer seeds than `workers`, fewer
/// (single-seed) sub-ranges are returned. `workers == 0` is treated as 1.
pub fn partition(range: SearchRange, workers: usize) -> Vec<SearchRange> {
    if range.is_empty() {
        return Vec::new();
    }

    let workers = workers.max(1) as u128;
    let span = range.len();
    let gap = span.div_ceil(workers);

    let mut ranges = Vec::with_capacity(workers as usize);
    let mut from = range.from as i128;
    let end = range.to as i128;

    for i in 0..workers {
        if from > end {
            break;
        }
        let to = if i == workers - 1 {
            end
        } else {
            (from + gap as i128 - 1).min(end)
        };
        ranges.push(SearchRange::new(from as i64, to as i64));
        from = to + 1;
    }

    ranges
}
