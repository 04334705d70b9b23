//! Cache keys for targets
//!
//! Every stored key starts with a one-byte tag. Short targets are stored under
//! `RAW_KEY_TAG ++ bytes`; targets too long for the store are stored under
//! `DIGEST_KEY_TAG ++ SHA-512(bytes)`. The tags keep the two key spaces
//! disjoint, so a digest key can never alias a raw key of the same length.

use crate::constants::{DIGEST_KEY_TAG, MAX_KEY_SIZE, RAW_KEY_TAG};
use sha2::{Digest, Sha512};

/// Longest target stored under its raw bytes
pub const MAX_RAW_TARGET_LEN: usize = MAX_KEY_SIZE - 1;

/// Cache key for a target
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Fingerprint {
    /// Target short enough to be its own key
    Raw(Vec<u8>),
    /// SHA-512 digest of an oversized target
    Digest([u8; 64]),
}

impl Fingerprint {
    /// Compute the fingerprint of a target
    pub fn of(target: &[u8]) -> Self {
        if target.len() <= MAX_RAW_TARGET_LEN {
            Self::Raw(target.to_vec())
        } else {
            let mut digest = [0u8; 64];
            digest.copy_from_slice(&Sha512::digest(target));
            Self::Digest(digest)
        }
    }

    /// Check whether this fingerprint is a digest
    pub fn is_digest(&self) -> bool {
        matches!(self, Self::Digest(_))
    }

    /// Serialize to the tagged store key
    pub fn to_key(&self) -> Vec<u8> {
        match self {
            Self::Raw(bytes) => {
                let mut key = Vec::with_capacity(bytes.len() + 1);
                key.push(RAW_KEY_TAG);
                key.extend_from_slice(bytes);
                key
            }
            Self::Digest(digest) => {
                let mut key = Vec::with_capacity(digest.len() + 1);
                key.push(DIGEST_KEY_TAG);
                key.extend_from_slice(digest);
                key
            }
        }
    }
}
