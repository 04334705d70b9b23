//! Identifier derivation for generated code

use crate::constants::IDENT_SUFFIX;
use rustc_hash::{FxHashMap, FxHashSet};

/// Names that a sanitized target may not take as-is
const RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield", "union",
    "seed_to_bytes", "next_seed_byte",
];

/// Map a target to a lowercase snake_case identifier stem
///
/// The target's escaped printable form is used, so `"a\nb"` becomes `a_nb`.
/// Runs of other characters collapse into one `_` and trailing underscores
/// are dropped, so stems never contain `__`. An empty stem becomes `s`; one
/// starting with a digit gets an `s_` prefix.
pub fn sanitize(target: &[u8]) -> String {
    let mut stem = String::new();
    for c in target.escape_ascii().map(char::from) {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }

    while stem.ends_with('_') {
        stem.pop();
    }
    if stem.is_empty() {
        stem.push('s');
    } else if stem.starts_with(|c: char| c.is_ascii_digit()) {
        stem.insert_str(0, "s_");
    }
    stem
}

/// Run-scoped registry of identifiers handed out to generated functions
#[derive(Debug)]
pub struct IdentRegistry {
    used: FxHashSet<String>,
    counters: FxHashMap<String, usize>,
}

impl IdentRegistry {
    /// Create a registry with the reserved names already taken
    pub fn new() -> Self {
        Self {
            used: RESERVED.iter().map(|s| s.to_string()).collect(),
            counters: FxHashMap::default(),
        }
    }

    /// Derive a fresh identifier for `target`
    ///
    /// Collisions are disambiguated with a numeric suffix; every identifier
    /// ends in `_rs`.
    pub fn reserve(&mut self, target: &[u8]) -> String {
        let stem = sanitize(target);
        let mut name = stem.clone();

        while self.used.contains(&name) {
            let n = self.counters.entry(stem.clone()).or_insert(0);
            *n += 1;
            name = format!("{}_{}", stem, n);
        }

        self.used.insert(name.clone());
        name.push_str(IDENT_SUFFIX);
        name
    }

    /// Number of identifiers handed out (reserved names excluded)
    pub fn len(&self) -> usize {
        self.used.len() - RESERVED.len()
    }

    /// Check if no identifier has been handed out
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for IdentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
