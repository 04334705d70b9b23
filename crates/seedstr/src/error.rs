//! Error types for the seedstr library.
//!
//! A target for which no seed exists is not an error: it is reported as
//! [`Resolution::Unfindable`](crate::app::searcher::Resolution).

use crate::infra::store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for seedstr operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all seedstr operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The seed store could not be opened or initialised
    #[error("seed store '{path}' is unavailable: {source}")]
    StoreUnavailable {
        /// Path of the store file
        path: PathBuf,
        /// Underlying store error
        #[source]
        source: StoreError,
    },

    /// An input file could not be read
    #[error("failed to read input '{path}': {source}")]
    MalformedInput {
        /// Path of the input ("-" for stdin)
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A store read or write failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A stored value could not be decoded as a seed record
    #[error("corrupt cache record ({len} bytes)")]
    CorruptRecord {
        /// Length of the undecodable value
        len: usize,
    },

    /// The search worker pool could not be started
    #[error("failed to start search workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// The search was stopped through its abort handle before finding a seed
    #[error("search aborted")]
    Aborted,
}

impl Error {
    /// Creates a new store-unavailable error
    pub fn store_unavailable(path: impl Into<PathBuf>, source: StoreError) -> Self {
        Self::StoreUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Creates a new malformed-input error
    pub fn malformed_input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::MalformedInput {
            path: path.into(),
            source,
        }
    }
}
