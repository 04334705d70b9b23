//! Arguments and setup shared by the seedstr binaries

use anyhow::{Context, Result};
use clap::Args;
use seedstr::infra::input::{RecordSplit, collect_targets};
use seedstr::{DEFAULT_DB_FILE, SeedCache, SeedSearch};
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

/// Seed database and worker options
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Seed database file
    #[arg(long, env = "SEEDSTR_DB", default_value = DEFAULT_DB_FILE)]
    pub db: PathBuf,

    /// Keep found seeds in memory only
    #[arg(long)]
    pub no_db: bool,

    /// Number of search workers (default: available parallelism)
    #[arg(short = 'j', long, env = "SEEDSTR_WORKERS")]
    pub workers: Option<usize>,
}

impl StoreArgs {
    /// Open the seed cache and build a searcher over it
    pub fn open_search(&self) -> Result<SeedSearch> {
        let cache = if self.no_db {
            info!("Using in-memory seed cache");
            SeedCache::in_memory()
        } else {
            SeedCache::open(&self.db)
                .with_context(|| format!("Failed to open seed database {}", self.db.display()))?
        };

        let workers = self.workers.unwrap_or_else(default_workers).max(1);
        let search = SeedSearch::new(cache, workers).context("Failed to start search workers")?;
        info!("Searching with {} workers", search.workers());
        Ok(search)
    }
}

/// Target input options
// Unused by seedstr_builddb
#[allow(dead_code)]
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Strings to process; taken as raw bytes, not necessarily UTF-8
    pub targets: Vec<OsString>,

    /// File with further strings, one per line; "-" reads stdin
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Split the input file on NUL bytes instead of newlines
    #[arg(short = '0', long)]
    pub null: bool,
}

#[allow(dead_code)]
impl InputArgs {
    /// Arguments first, then records from the input file
    pub fn collect(&self) -> Result<Vec<Vec<u8>>> {
        let split = if self.null {
            RecordSplit::Nul
        } else {
            RecordSplit::Lines
        };
        let args = self.targets.iter().cloned().map(OsString::into_encoded_bytes);
        let targets =
            collect_targets(args, self.file.as_deref(), split).context("Failed to read targets")?;
        Ok(targets)
    }
}

/// Install the stderr log subscriber for `-v` occurrences
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Buffered writer for `path`, or stdout
#[allow(dead_code)]
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
