//! Seed database builder CLI
//!
//! Usage: seedstr_builddb --length <N> [options]
//!
//! Searches a seed for every string of the given length and stores it.
//! Strings already in the database are skipped, so an interrupted build can
//! simply be restarted.
//!
//! Example:
//!   seedstr_builddb --length 2 --db seeds.redb -v

mod common;

use anyhow::Result;
use clap::Parser;
use common::{StoreArgs, init_logging};
use seedstr::{BuildProgress, ByteRange, DatabaseBuilder};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Interval between progress lines
const REPORT_INTERVAL: Duration = Duration::from_secs(15);

/// Fill the seed database with every string of a fixed length
#[derive(Parser, Debug)]
#[command(name = "seedstr_builddb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    /// Length of the strings to enumerate
    #[arg(short, long)]
    length: usize,

    /// First seed to try for each string (default: smallest seed)
    #[arg(long, allow_hyphen_values = true, default_value_t = i64::MIN)]
    start: i64,

    /// Include all bytes, not only printable ASCII
    #[arg(long)]
    nonprint: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let range = if cli.nonprint {
        ByteRange::FULL
    } else {
        ByteRange::PRINTABLE
    };

    let search = cli.store.open_search()?;
    match search.cache().len() {
        Ok(n) => info!("{} strings in database", n),
        Err(e) => warn!("Unable to count database records: {}", e),
    }

    let start = Instant::now();
    let mut last_report = start;
    let mut last_done = 0u64;
    let builder = DatabaseBuilder::new(&search);

    let summary = builder.build(cli.length, range, cli.start, |p: &BuildProgress| {
        let now = Instant::now();
        let since = now.duration_since(last_report);
        if since < REPORT_INTERVAL && p.done != p.total {
            return;
        }
        let rate = (p.done - last_done) as f64 / since.as_secs_f64().max(f64::EPSILON);
        info!(
            "{}/{} strings ({} skipped, {} unfindable) in {:.0?} ({:.2}/s)",
            p.done,
            p.total,
            p.skipped,
            p.unfindable,
            now.duration_since(start),
            rate
        );
        last_report = now;
        last_done = p.done;
    })?;

    println!(
        "Built {} strings of length {}: {} found, {} unfindable, {} already present ({:.2?})",
        summary.done,
        cli.length,
        summary.found,
        summary.unfindable,
        summary.skipped,
        start.elapsed()
    );
    match search.cache().len() {
        Ok(n) => info!("{} strings in database", n),
        Err(e) => warn!("Unable to count database records: {}", e),
    }
    Ok(())
}
