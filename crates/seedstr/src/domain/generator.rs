//! Seeded byte generator
//!
//! A single SplitMix64 stream maps `(seed, length)` to a byte string.
//! The step function lives in `generator_core.rs`, which is compiled here and
//! copied verbatim into generated code by [`GENERATOR_SOURCE`], so search-time
//! and reconstruction-time output cannot drift apart.

use crate::domain::byte_range::ByteRange;

include!("generator_core.rs");

/// Source text of the generator, embedded in every generated module
pub const GENERATOR_SOURCE: &str = include_str!("generator_core.rs");

/// Generate `len` bytes from `seed` without restriction
///
/// Used for reconstruction and for verifying a seed before it is cached.
#[inline]
pub fn generate(seed: i64, len: usize) -> Vec<u8> {
    seed_to_bytes(seed, len)
}

/// Generate `len` bytes from `seed`, rejecting the seed on the first byte
/// outside `range`
pub fn generate_within(seed: i64, len: usize, range: ByteRange) -> Option<Vec<u8>> {
    let mut state = seed as u64;
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        let b = next_seed_byte(&mut state);
        if !range.contains(b) {
            return None;
        }
        out.push(b);
    }
    Some(out)
}

/// Check whether `seed` regenerates `target`
///
/// Short-circuits on the first byte that is out of `range` or differs from
/// the target, which is what makes the brute-force search tractable.
#[inline]
pub fn matches_target(seed: i64, target: &[u8], range: ByteRange) -> bool {
    let mut state = seed as u64;
    for &expected in target {
        let b = next_seed_byte(&mut state);
        if !range.contains(b) || b != expected {
            return false;
        }
    }
    true
}
