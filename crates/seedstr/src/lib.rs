//! seedstr - Find PRNG seeds that regenerate byte strings
//!
//! This crate provides functionality to:
//! - Brute-force a seed whose generator output reproduces a target byte string
//! - Memoize found seeds (and targets proven unfindable) in a persistent cache
//! - Split long strings into chunks and emit Rust source that rebuilds them
//! - Precompute the cache for every string of a fixed length

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod infra;

// Re-export commonly used types
pub use app::builder::{BuildProgress, BuildSummary, DatabaseBuilder};
pub use app::codegen::{CodeGenEmitter, CodeGenOptions, EmittedTarget};
pub use app::searcher::{FindOptions, Resolution, SeedSearch};
pub use constants::*;
pub use domain::byte_range::ByteRange;
pub use domain::chunk::{Chunk, split};
pub use domain::generator::{GENERATOR_SOURCE, generate, generate_within, seed_to_bytes};
pub use domain::partition::{SearchRange, SearchSpace};
pub use error::{Error, Result};
pub use infra::seed_cache::SeedCache;
pub use infra::store::{MemoryStore, RedbStore, SeedStore, StoreError};
