//! Infrastructure layer - I/O and external dependencies
//!
//! This module handles the seed store, the seed cache built on it, and input
//! reading.

pub mod input;
pub mod seed_cache;
pub mod store;
