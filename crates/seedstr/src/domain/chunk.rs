//! Target chunking
//!
//! Expected brute-force cost grows by a factor of the alphabet size per byte,
//! so long targets are split into short chunks that are searched separately.
//! Smaller chunks search faster but cost one generator call each when the
//! string is rebuilt.

use std::ops::Range;

/// Contiguous slice of a target, optionally resolved to a seed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// Byte offset within the target
    pub offset: usize,
    /// Number of bytes
    pub len: usize,
    /// Seed regenerating the chunk, once resolved
    pub seed: Option<i64>,
}

impl Chunk {
    /// Create an unresolved chunk
    pub fn new(offset: usize, len: usize) -> Self {
        Self {
            offset,
            len,
            seed: None,
        }
    }

    /// Byte range of the chunk within its target
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }

    /// The chunk's bytes within `target`
    pub fn slice<'a>(&self, target: &'a [u8]) -> &'a [u8] {
        &target[self.range()]
    }

    /// Check if the chunk has a seed
    pub fn is_resolved(&self) -> bool {
        self.seed.is_some()
    }
}

/// Split a target of `len` bytes into chunks of `chunk_size` bytes
///
/// The last chunk may be shorter. A `chunk_size` of 0 is treated as 1.
pub fn split(len: usize, chunk_size: usize) -> Vec<Chunk> {
    let chunk_size = chunk_size.max(1);
    (0..len)
        .step_by(chunk_size)
        .map(|offset| Chunk::new(offset, chunk_size.min(len - offset)))
        .collect()
}
