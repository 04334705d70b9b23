//! Byte range restriction for generator output

/// Closed interval of allowed byte values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ByteRange {
    /// Smallest allowed byte
    pub lo: u8,
    /// Largest allowed byte
    pub hi: u8,
}

impl ByteRange {
    /// Every byte value
    pub const FULL: Self = Self { lo: 0x00, hi: 0xFF };

    /// Printable ASCII (space through tilde)
    pub const PRINTABLE: Self = Self { lo: b' ', hi: b'~' };

    /// Lowercase ASCII letters
    pub const LOWERCASE: Self = Self { lo: b'a', hi: b'z' };

    /// Create a range, swapping the bounds if given in reverse
    pub fn new(lo: u8, hi: u8) -> Self {
        if lo <= hi {
            Self { lo, hi }
        } else {
            Self { lo: hi, hi: lo }
        }
    }

    /// Check whether `b` lies within the range
    #[inline]
    pub fn contains(&self, b: u8) -> bool {
        self.lo <= b && b <= self.hi
    }

    /// Check whether every byte of `bytes` lies within the range
    pub fn contains_all(&self, bytes: &[u8]) -> bool {
        bytes.iter().all(|&b| self.contains(b))
    }

    /// Number of distinct byte values in the range
    pub fn size(&self) -> u32 {
        self.hi as u32 - self.lo as u32 + 1
    }
}

impl Default for ByteRange {
    fn default() -> Self {
        Self::FULL
    }
}
