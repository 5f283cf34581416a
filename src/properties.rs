//! Reading and writing `.properties` files.
//!
//! Line syntax: blank lines and lines starting with `#` (after leading
//! whitespace) are comments. Every other line is split on its first `=` and
//! both sides are trimmed. Lines without `=`, or with nothing before it, are
//! skipped.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{trace, warn};

use crate::error::PropymlError;
use crate::store::FlatStore;

/// Parse properties text into a store. Malformed lines are ignored; if a key
/// repeats, its last assignment wins.
pub fn parse(text: &str) -> FlatStore {
    let mut store = FlatStore::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            trace!(line = index + 1, "skipping line without '='");
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            trace!(line = index + 1, "skipping line with empty key");
            continue;
        }

        if store.insert(key, value.trim()).is_some() {
            warn!(key, line = index + 1, "duplicate key, keeping the last value");
        }
    }

    store
}

/// Read and parse a properties file.
pub fn read(path: &Path) -> Result<FlatStore, PropymlError> {
    let text = std::fs::read_to_string(path).map_err(|e| PropymlError::IoError {
        action: "read",
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse(&text))
}

/// Write pre-rendered lines verbatim, one write per line.
pub fn write_lines<W: Write>(out: W, lines: &[String]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(out);
    for line in lines {
        writer.write_all(line.as_bytes())?;
    }
    writer.flush()
}

/// Write pre-rendered lines into an already opened output file.
pub(crate) fn write_file(file: File, path: &Path, lines: &[String]) -> Result<(), PropymlError> {
    write_lines(file, lines).map_err(|e| PropymlError::IoError {
        action: "write",
        path: path.to_path_buf(),
        source: e,
    })
}
