use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use thiserror::Error;
use tracing::debug;

/// Well-known location of the optima table relative to the working
/// directory of a benchmark checkout.
pub const DEFAULT_OPTIMA_PATH: &str = "graphs/optima.md";

#[derive(Debug, Error)]
pub enum OptimaReaderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Entry in line {} carries no parsable optimum: {source}", lineno + 1)]
    InvalidOptimum {
        lineno: usize,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Returns the recorded optimum for `graph`, or `None` if the table has no
/// entry for it.
pub fn lookup(path: &Path, graph: &str) -> Result<Option<u64>, OptimaReaderError> {
    debug!("Look up {graph} in {path:?}");
    let file = File::open(path)?;
    lookup_from(BufReader::new(file), graph)
}

/// Scans lines in order and takes the first whose leading identifier is
/// `graph`. The identifier must be terminated by end-of-line, whitespace,
/// or `|`, so `g1` does not pick up an entry for `g10`. The optimum is the
/// trimmed substring after the last `|` of the matching line.
pub fn lookup_from(reader: impl BufRead, graph: &str) -> Result<Option<u64>, OptimaReaderError> {
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;

        if !entry_matches(&line, graph) {
            continue;
        }

        let field = match line.rfind('|') {
            Some(pos) => &line[pos + 1..],
            None => line.as_str(),
        };

        return match field.trim().parse() {
            Ok(optimum) => Ok(Some(optimum)),
            Err(source) => Err(OptimaReaderError::InvalidOptimum { lineno, source }),
        };
    }

    Ok(None)
}

fn entry_matches(line: &str, graph: &str) -> bool {
    match line.strip_prefix(graph) {
        Some(rest) => rest
            .chars()
            .next()
            .is_none_or(|c| c.is_whitespace() || c == '|'),
        None => false,
    }
}
