//! Target input reading
//!
//! Targets come from command-line arguments first, then from an optional file
//! (or `-` for stdin) split into newline- or NUL-terminated records.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Record separator for input files
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecordSplit {
    /// Newline-terminated lines; a trailing `\r` is dropped
    #[default]
    Lines,
    /// NUL-terminated records
    Nul,
}

/// Read all records from `reader`
///
/// A final record without a terminator is kept; an empty trailing record
/// (input ending in a terminator) is not produced.
pub fn read_records(reader: impl Read, split: RecordSplit) -> io::Result<Vec<Vec<u8>>> {
    let delimiter = match split {
        RecordSplit::Lines => b'\n',
        RecordSplit::Nul => 0,
    };

    let mut reader = BufReader::new(reader);
    let mut records = Vec::new();

    loop {
        let mut buf = Vec::new();
        let n = reader.read_until(delimiter, &mut buf)?;
        if n == 0 {
            break;
        }
        if buf.last() == Some(&delimiter) {
            buf.pop();
        }
        if split == RecordSplit::Lines && buf.last() == Some(&b'\r') {
            buf.pop();
        }
        records.push(buf);
    }

    Ok(records)
}

/// Collect targets from arguments and an optional input file
///
/// # Arguments
/// * `args` - Targets given directly, used first and in order
/// * `file` - File to read further targets from; `-` reads stdin
/// * `split` - Record separator for the file
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] if the file cannot be opened or read.
pub fn collect_targets<I, S>(args: I, file: Option<&Path>, split: RecordSplit) -> Result<Vec<Vec<u8>>>
where
    I: IntoIterator<Item = S>,
    S: Into<Vec<u8>>,
{
    let mut targets: Vec<Vec<u8>> = args.into_iter().map(Into::into).collect();

    let Some(path) = file else {
        return Ok(targets);
    };

    let records = if path == Path::new("-") {
        read_records(io::stdin().lock(), split)
    } else {
        File::open(path).and_then(|f| read_records(f, split))
    }
    .map_err(|e| Error::malformed_input(path, e))?;

    targets.extend(records);
    Ok(targets)
}
