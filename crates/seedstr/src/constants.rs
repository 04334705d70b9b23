//! Seed search and cache constants

// =============================================================================
// Store parameters
// =============================================================================

/// Maximum key size accepted by the seed store (bytes, including the tag byte)
///
/// Targets whose tagged key would exceed this are stored under a digest key.
pub const MAX_KEY_SIZE: usize = 32_768;

/// Name of the single table holding seed records
pub const SEEDS_TABLE: &str = "seeds";

/// Key tag for targets stored under their raw bytes
pub const RAW_KEY_TAG: u8 = 0x00;

/// Key tag for targets stored under their SHA-512 digest
pub const DIGEST_KEY_TAG: u8 = 0x01;

/// Default database file used by the CLI tools
pub const DEFAULT_DB_FILE: &str = "seedstr.redb";

// =============================================================================
// Search parameters
// =============================================================================

/// Seed returned for the empty target
pub const EMPTY_TARGET_SEED: i64 = 0;

/// Maximum encoded length of a seed record (zig-zag LEB128 of an i64)
pub const MAX_VARINT_LEN: usize = 10;

// =============================================================================
// Code generation
// =============================================================================

/// Default chunk length for code generation
///
/// Expected search cost grows by a factor of 256 per byte, so three-byte
/// chunks (~2^24 candidates each) resolve in well under a second per chunk.
pub const DEFAULT_CHUNK_LEN: usize = 3;

/// Default module name for generated code
pub const DEFAULT_MODULE_NAME: &str = "seedstrs";

/// Suffix appended to every generated function name
pub const IDENT_SUFFIX: &str = "_rs";
