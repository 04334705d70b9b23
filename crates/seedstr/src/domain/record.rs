//! Seed record encoding
//!
//! Found seeds are stored as zig-zag LEB128 varints (1-10 bytes).
//! Unfindable is stored as the empty value, which no varint can produce.

use crate::constants::MAX_VARINT_LEN;

/// Cached state of a target
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedRecord {
    /// A verified seed regenerating the target
    Found(i64),
    /// A full-range search proved no seed exists
    Unfindable,
    /// Nothing is known yet (never stored)
    Absent,
}

impl SeedRecord {
    /// Encode for storage
    ///
    /// Returns `None` for `Absent`, which is never persisted.
    pub fn encode(&self) -> Option<Vec<u8>> {
        match *self {
            Self::Found(seed) => Some(encode_varint(seed)),
            Self::Unfindable => Some(Vec::new()),
            Self::Absent => None,
        }
    }

    /// Decode a stored value
    ///
    /// Returns `None` if the value is not a complete, canonical-length varint.
    pub fn decode(value: &[u8]) -> Option<Self> {
        if value.is_empty() {
            return Some(Self::Unfindable);
        }
        let (seed, used) = decode_varint(value)?;
        (used == value.len()).then_some(Self::Found(seed))
    }
}

/// Encode a signed integer as a zig-zag LEB128 varint
pub fn encode_varint(value: i64) -> Vec<u8> {
    let mut ux = ((value << 1) ^ (value >> 63)) as u64;
    let mut buf = Vec::with_capacity(MAX_VARINT_LEN);
    while ux >= 0x80 {
        buf.push((ux as u8) | 0x80);
        ux >>= 7;
    }
    buf.push(ux as u8);
    buf
}

/// Decode a zig-zag LEB128 varint
///
/// Returns the decoded value and the number of bytes consumed.
pub fn decode_varint(data: &[u8]) -> Option<(i64, usize)> {
    let mut ux: u64 = 0;
    let mut shift = 0u32;

    for (i, &byte) in data.iter().enumerate() {
        if i >= MAX_VARINT_LEN {
            return None;
        }
        // The tenth byte may only carry the final bit
        if i == MAX_VARINT_LEN - 1 && byte > 1 {
            return None;
        }

        ux |= ((byte & 0x7F) as u64) << shift;
        if byte & 0x80 == 0 {
            let value = ((ux >> 1) as i64) ^ -((ux & 1) as i64);
            return Some((value, i + 1));
        }
        shift += 7;
    }

    None
}
