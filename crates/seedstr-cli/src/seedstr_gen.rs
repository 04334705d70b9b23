//! Rust source generation CLI
//!
//! Usage: seedstr_gen [options] [string...]
//!
//! Writes a Rust module with one function per input string. Each function
//! rebuilds its string from generator seeds at run time.
//!
//! Example:
//!   seedstr_gen --chunk-len 2 --module secrets -o src/secrets.rs password

mod common;

use anyhow::{Context, Result};
use clap::Parser;
use common::{InputArgs, StoreArgs, init_logging, open_output};
use seedstr::{
    ByteRange, CodeGenEmitter, CodeGenOptions, DEFAULT_CHUNK_LEN, DEFAULT_MODULE_NAME,
    FindOptions,
};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// Generate Rust functions that rebuild strings from generator seeds
#[derive(Parser, Debug)]
#[command(name = "seedstr_gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    store: StoreArgs,

    /// Bytes per independently searched chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_LEN)]
    chunk_len: usize,

    /// Name of the generated module
    #[arg(long, default_value = DEFAULT_MODULE_NAME)]
    module: String,

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

    let mut find = FindOptions::default();
    if cli.printable {
        find = find.with_byte_range(ByteRange::PRINTABLE);
    }
    let options = CodeGenOptions {
        chunk_len: cli.chunk_len,
        module_name: cli.module.clone(),
        find,
    };
    let mut emitter = CodeGenEmitter::new(&search, options);

    let start = Instant::now();
    let mut incomplete = 0usize;
    write!(out, "{}", emitter.prelude())?;
    for target in &targets {
        let Some(emitted) = emitter
            .emit(target)
            .with_context(|| format!("Code generation stopped at \"{}\"", target.escape_ascii()))?
        else {
            info!("Skipping duplicate \"{}\"", target.escape_ascii());
            continue;
        };
        if !emitted.is_complete() {
            incomplete += 1;
        }
        write!(out, "\n{}", emitted.source)?;
    }
    write!(out, "{}", emitter.epilogue())?;
    out.flush()?;

    if incomplete > 0 {
        warn!("{} strings have chunks without a seed", incomplete);
    }
    info!(
        "Generated {} functions in {:.2?}",
        emitter.emitted(),
        start.elapsed()
    );
    Ok(())
}
