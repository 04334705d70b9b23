//! Lexicographic enumeration of fixed-length strings

use crate::domain::byte_range::ByteRange;

/// Increment `s` as an odometer whose digits run over `range`
///
/// The last byte is incremented; a byte at `range.hi` wraps to `range.lo` and
/// carries into the byte on its left. Returns `true` when the first byte
/// overflows, i.e. when enumeration is complete. An empty string overflows
/// immediately.
pub fn increment(s: &mut [u8], range: ByteRange) -> bool {
    for i in (0..s.len()).rev() {
        if s[i] >= range.hi {
            if i == 0 {
                return true;
            }
            s[i] = range.lo;
            continue;
        }
        s[i] += 1;
        return false;
    }
    true
}

/// Number of strings of `len` bytes over `range`, saturating at `u64::MAX`
pub fn count_strings(len: usize, range: ByteRange) -> u64 {
    let base = range.size() as u64;
    (0..len).fold(1u64, |acc, _| acc.saturating_mul(base))
}
