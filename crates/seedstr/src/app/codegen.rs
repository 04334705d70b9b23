//! Rust code generation
//!
//! Each target becomes one function that rebuilds it from (seed, length)
//! pairs at run time, so the literal never appears in the compiled artifact.
//! Functions are wrapped in a module that carries its own copy of the
//! generator source.

use crate::app::searcher::{FindOptions, Resolution, SeedSearch};
use crate::constants::{DEFAULT_CHUNK_LEN, DEFAULT_MODULE_NAME};
use crate::domain::chunk::{Chunk, split};
use crate::domain::generator::{GENERATOR_SOURCE, generate};
use crate::domain::ident::{IdentRegistry, sanitize};
use crate::error::Result;
use rustc_hash::FxHashSet;
use std::fmt::Write;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Code generation options
#[derive(Clone, Debug)]
pub struct CodeGenOptions {
    /// Bytes per independently searched chunk
    pub chunk_len: usize,
    /// Name of the generated module
    pub module_name: String,
    /// Options passed to every chunk search
    pub find: FindOptions,
}

impl Default for CodeGenOptions {
    fn default() -> Self {
        Self {
            chunk_len: DEFAULT_CHUNK_LEN,
            module_name: DEFAULT_MODULE_NAME.to_string(),
            find: FindOptions::default(),
        }
    }
}

/// Generated function for one target
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmittedTarget {
    /// Function name
    pub ident: String,
    /// Chunks in target order; unresolved chunks have no seed
    pub chunks: Vec<Chunk>,
    /// Rust source of the function
    pub source: String,
}

impl EmittedTarget {
    /// Check whether every chunk has a seed
    pub fn is_complete(&self) -> bool {
        self.chunks.iter().all(Chunk::is_resolved)
    }

    /// Chunks no seed was found for
    pub fn unresolved(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter(|c| !c.is_resolved())
    }

    /// Bytes the generated function returns
    ///
    /// Unresolved chunks are skipped, exactly as in the generated code.
    pub fn reconstruct(&self) -> Vec<u8> {
        self.chunks
            .iter()
            .filter_map(|c| c.seed.map(|seed| generate(seed, c.len)))
            .flatten()
            .collect()
    }
}

/// Turns targets into reconstruction functions
///
/// The set of emitted targets and the identifier registry belong to this
/// emitter, so separate runs never share naming or deduplication state.
pub struct CodeGenEmitter<'a> {
    search: &'a SeedSearch,
    options: CodeGenOptions,
    seen: FxHashSet<Vec<u8>>,
    idents: IdentRegistry,
}

impl<'a> CodeGenEmitter<'a> {
    /// Create an emitter resolving chunks through `search`
    pub fn new(search: &'a SeedSearch, options: CodeGenOptions) -> Self {
        Self {
            search,
            options,
            seen: FxHashSet::default(),
            idents: IdentRegistry::new(),
        }
    }

    /// Name of the generated module, made into a valid identifier
    pub fn module_name(&self) -> String {
        sanitize(self.options.module_name.as_bytes())
    }

    /// Source opening the generated module, including the generator
    pub fn prelude(&self) -> String {
        let mut out = String::new();
        out.push_str("// Generated by seedstr. Do not edit.\n");
        out.push_str("#[allow(dead_code)]\n");
        let _ = writeln!(out, "pub mod {} {{", self.module_name());
        out.push_str(GENERATOR_SOURCE);
        out
    }

    /// Source closing the generated module
    pub fn epilogue(&self) -> String {
        "}\n".to_string()
    }

    /// Number of distinct targets emitted so far
    pub fn emitted(&self) -> usize {
        self.seen.len()
    }

    /// Emit a function for `target`
    ///
    /// Returns `None` if the target was already emitted by this emitter. A
    /// target only counts as emitted once all of its chunks were searched.
    /// Chunks without a seed are left out of the generated expression and
    /// marked with a comment; the call still succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Aborted`](crate::Error::Aborted) if the searcher was aborted.
    pub fn emit(&mut self, target: &[u8]) -> Result<Option<EmittedTarget>> {
        if self.seen.contains(target) {
            return Ok(None);
        }

        let started = Instant::now();
        let mut chunks = split(target.len(), self.options.chunk_len);
        for chunk in chunks.iter_mut() {
            let bytes = chunk.slice(target);
            info!(
                "Working on bytes {}..{} of \"{}\": \"{}\"",
                chunk.offset,
                chunk.offset + chunk.len,
                target.escape_ascii(),
                bytes.escape_ascii()
            );
            match self.search.find(bytes, self.options.find)? {
                Resolution::Found(seed) => chunk.seed = Some(seed),
                Resolution::Unfindable => warn!(
                    "No seed for bytes {}..{} of \"{}\"",
                    chunk.offset,
                    chunk.offset + chunk.len,
                    target.escape_ascii()
                ),
            }
        }

        let elapsed = started.elapsed();
        info!(
            "Found seeds for \"{}\" in {:.3?} ({:.3?}/byte)",
            target.escape_ascii(),
            elapsed,
            per_byte(elapsed, target.len())
        );

        self.seen.insert(target.to_vec());
        let ident = self.idents.reserve(target);
        let source = render_function(&ident, target, &chunks);
        Ok(Some(EmittedTarget {
            ident,
            chunks,
            source,
        }))
    }
}

/// Average time spent per byte of a target
fn per_byte(elapsed: Duration, len: usize) -> Duration {
    if len == 0 {
        Duration::ZERO
    } else {
        elapsed.div_f64(len as f64)
    }
}

/// Render one reconstruction function
fn render_function(ident: &str, target: &[u8], chunks: &[Chunk]) -> String {
    let resolved = chunks.iter().filter(|c| c.is_resolved()).count();

    let mut out = String::new();
    let _ = writeln!(out, "/// b\"{}\"", target.escape_ascii());
    let _ = writeln!(out, "pub fn {}() -> Vec<u8> {{", ident);
    let _ = writeln!(out, "    let parts: [Vec<u8>; {}] = [", resolved);
    for chunk in chunks {
        match chunk.seed {
            Some(seed) => {
                let _ = writeln!(out, "        seed_to_bytes({}, {}),", seed, chunk.len);
            }
            None => {
                let _ = writeln!(
                    out,
                    "        // bytes {}..{} (b\"{}\") not found: no matching seed exists",
                    chunk.offset,
                    chunk.offset + chunk.len,
                    chunk.slice(target).escape_ascii()
                );
            }
        }
    }
    out.push_str("    ];\n");
    out.push_str("    parts.concat()\n");
    out.push_str("}\n");
    out
}
