use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use thiserror::Error;
use tracing::debug;

/// Comment lines of a solution file start with this marker.
const COMMENT_MARKER: char = 'c';
/// The header line carrying the edge count starts with this marker.
const HEADER_MARKER: char = 'p';

#[derive(Debug, Error)]
pub enum SolutionReaderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Line {} is neither a comment nor a header", lineno + 1)]
    UnexpectedLine { lineno: usize },

    #[error("No header line found in the input")]
    NoHeaderFound,

    #[error("Header in line {} carries no parsable edge count: {source}", lineno + 1)]
    InvalidEdgeCount {
        lineno: usize,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// The part of a solution file the checker cares about: the number of
/// matching edges claimed by the `p` header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution {
    num_edges: u64,
}

impl Solution {
    pub fn num_edges(&self) -> u64 {
        self.num_edges
    }

    pub fn read(path: &Path) -> Result<Self, SolutionReaderError> {
        debug!("Read solution from {path:?}");
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    /// Scans lines in order: comments are skipped, the first non-comment
    /// line must be a header and its last whitespace-separated token is the
    /// edge count. Remaining lines are not read.
    pub fn read_from(reader: impl BufRead) -> Result<Self, SolutionReaderError> {
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;

            if line.starts_with(COMMENT_MARKER) {
                continue;
            }

            if !line.starts_with(HEADER_MARKER) {
                return Err(SolutionReaderError::UnexpectedLine { lineno });
            }

            // a line starting with the header marker has at least one token
            let token = line.split_whitespace().next_back().unwrap();
            return match token.parse() {
                Ok(num_edges) => Ok(Self { num_edges }),
                Err(source) => Err(SolutionReaderError::InvalidEdgeCount { lineno, source }),
            };
        }

        Err(SolutionReaderError::NoHeaderFound)
    }
}
