//! Seed lookup CLI
//!
//! Usage: seedstr_find [options] [string...]
//!
//! Prints one `<string> -> <seed>` line per input string, consulting and
//! updating the seed database.
//!
//! Example:
//!   seedstr_find hello world
//!   seedstr_find -f words.txt --db seeds.redb -v

mod common;

use anyhow::Result;
use clap::Parser;
use common::{InputArgs, StoreArgs, init_logging, open_output};
use seedstr::{ByteRange, FindOptions, Resolution};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// Find generator seeds that reproduce strings
#[derive(Parser, Debug)]
#[command(name = "seedstr_find")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    store: StoreArgs,

    /// First seed to try (default: smallest seed)
    #[arg(long, allow_hyphen_values = true)]
    start: Option<i64>,

    /// Only accept seeds whose output stays within printable ASCII
    #[arg(long)]
    printable: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let targets = cli.input.collect()?;
    let search = cli.store.open_search()?;
    let mut out = open_output(cli.output.as_deref())?;

    let mut options = match cli.start {
        Some(seed) => FindOptions::from_seed(seed),
        None => FindOptions::default(),
    };
    if cli.printable {
        options = options.with_byte_range(ByteRange::PRINTABLE);
    }

    let start = Instant::now();
    let mut unfindable = 0usize;
    for target in &targets {
        match search.find(target, options)? {
            Resolution::Found(seed) => writeln!(out, "{} -> {}", target.escape_ascii(), seed)?,
            Resolution::Unfindable => {
                unfindable += 1;
                warn!("No seed found for \"{}\"", target.escape_ascii());
                writeln!(out, "{} -> unfindable", target.escape_ascii())?;
            }
        }
    }
    out.flush()?;

    info!(
        "Processed {} strings ({} unfindable) in {:.2?}",
        targets.len(),
        unfindable,
        start.elapsed()
    );
    Ok(())
}
