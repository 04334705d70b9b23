//! Domain layer - Pure computational logic
//!
//! This module contains pure functions and algorithms without I/O dependencies.

pub mod byte_range;
pub mod chunk;
pub mod fingerprint;
pub mod generator;
pub mod ident;
pub mod odometer;
pub mod partition;
pub mod record;
