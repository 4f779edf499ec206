use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::io::optima_reader::{self, OptimaReaderError};
use crate::io::solution_reader::{Solution, SolutionReaderError};

/// Solution files carry this extension on top of the graph name.
pub const SOLUTION_EXT: &str = ".sol";

#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("Couldn't find file {}.", path.display())]
    SolutionMissing { path: PathBuf },

    #[error("File {} is no dmx file.", path.display())]
    NotDmxFile {
        path: PathBuf,
        #[source]
        source: SolutionReaderError,
    },

    #[error("Couldn't finde optimafile {}.", path.display())]
    OptimaTableMissing { path: PathBuf },

    #[error("Couldn't find graph {graph} in {}.", table.display())]
    GraphNotFound { graph: String, table: PathBuf },

    #[error(transparent)]
    OptimaReaderError(#[from] OptimaReaderError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Optimal,
    Suboptimal { optimum: u64, num_edges: u64 },
}

impl Verdict {
    pub fn new(optimum: u64, num_edges: u64) -> Self {
        if optimum == num_edges {
            Self::Optimal
        } else {
            Self::Suboptimal { optimum, num_edges }
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, Self::Optimal)
    }
}

/// Base name of the solution path with the solution extension stripped.
/// Stripping is idempotent: a name without the extension passes unchanged.
pub fn graph_name(path: &Path) -> String {
    let base = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => path.to_string_lossy(),
    };

    match base.strip_suffix(SOLUTION_EXT) {
        Some(stripped) => stripped.to_string(),
        None => base.into_owned(),
    }
}

/// Extracts the claimed edge count from the solution file, looks up the
/// recorded optimum for its graph, and compares the two.
pub fn evaluate(solution_path: &Path, optima_path: &Path) -> Result<Verdict, CheckerError> {
    let solution = match Solution::read(solution_path) {
        Ok(solution) => solution,
        Err(SolutionReaderError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            return Err(CheckerError::SolutionMissing {
                path: solution_path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(CheckerError::NotDmxFile {
                path: solution_path.to_path_buf(),
                source,
            });
        }
    };

    let graph = graph_name(solution_path);

    let optimum = match optima_reader::lookup(optima_path, &graph) {
        Ok(Some(optimum)) => optimum,
        Ok(None) => {
            return Err(CheckerError::GraphNotFound {
                graph,
                table: optima_path.to_path_buf(),
            });
        }
        Err(OptimaReaderError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            return Err(CheckerError::OptimaTableMissing {
                path: optima_path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    debug!(
        "Graph {graph}: optimum {optimum}, solution {}",
        solution.num_edges()
    );

    Ok(Verdict::new(optimum, solution.num_edges()))
}

/// Prints the verdict or diagnostic for one solution file and returns
/// whether a verdict was reached. The message text is a compatibility
/// contract with scripted consumers; do not reword it.
pub fn report_into(
    out: &mut impl Write,
    solution_path: &Path,
    optima_path: &Path,
) -> io::Result<bool> {
    match evaluate(solution_path, optima_path) {
        Ok(Verdict::Optimal) => writeln!(out, "Solution is optimal.")?,
        Ok(Verdict::Suboptimal { optimum, num_edges }) => {
            writeln!(
                out,
                "Solution is not optimal. Optimum: {optimum}, Solution: {num_edges}"
            )?;
            if num_edges > optimum {
                writeln!(out, "WARNING: Solution is to big.")?;
            }
        }
        Err(err) => {
            writeln!(out, "{err}")?;
            if let CheckerError::SolutionMissing { path } = &err {
                writeln!(out, "File {} is no dmx file.", path.display())?;
            }
            return Ok(false);
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::tests::testcases_directory;

    fn optima() -> PathBuf {
        testcases_directory("optima.md")
    }

    fn run(name: &str) -> (bool, String) {
        let mut out = Vec::new();
        let checked = report_into(&mut out, &testcases_directory(name), &optima()).unwrap();
        (checked, String::from_utf8(out).unwrap())
    }

    #[test]
    fn optimal_solution() {
        assert_eq!(run("g1.sol"), (true, "Solution is optimal.\n".to_string()));
    }

    #[test]
    fn oversized_solution() {
        let expected = "Solution is not optimal. Optimum: 42, Solution: 50\n\
                        WARNING: Solution is to big.\n";
        assert_eq!(run("g2.sol"), (true, expected.to_string()));
    }

    #[test]
    fn undersized_solution() {
        let expected = "Solution is not optimal. Optimum: 35, Solution: 30\n";
        assert_eq!(run("g3.sol"), (true, expected.to_string()));
    }

    #[test]
    fn longer_identifier_sharing_a_prefix() {
        // testcases/optima.md lists g10 before g1
        assert_eq!(
            evaluate(&testcases_directory("g10.sol"), &optima()).unwrap(),
            Verdict::Optimal
        );
    }

    #[test]
    fn graph_not_in_table() {
        let (checked, out) = run("unknown.sol");
        assert!(!checked);
        assert_eq!(
            out,
            format!("Couldn't find graph unknown in {}.\n", optima().display())
        );
    }

    #[test]
    fn malformed_solution_file() {
        let (checked, out) = run("notdmx.sol");
        assert!(!checked);
        assert_eq!(
            out,
            format!(
                "File {} is no dmx file.\n",
                testcases_directory("notdmx.sol").display()
            )
        );
    }

    #[test]
    fn missing_solution_file() {
        let path = testcases_directory("does-not-exist.sol");
        let (checked, out) = {
            let mut buf = Vec::new();
            let checked = report_into(&mut buf, &path, &optima()).unwrap();
            (checked, String::from_utf8(buf).unwrap())
        };
        assert!(!checked);
        assert_eq!(
            out,
            format!(
                "Couldn't find file {p}.\nFile {p} is no dmx file.\n",
                p = path.display()
            )
        );
    }

    #[test]
    fn missing_optima_table() {
        let table = testcases_directory("no-such-table.md");
        let mut buf = Vec::new();
        let checked = report_into(&mut buf, &testcases_directory("g1.sol"), &table).unwrap();
        assert!(!checked);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            format!("Couldn't finde optimafile {}.\n", table.display())
        );
    }

    #[test]
    fn graph_name_strips_solution_ext() {
        assert_eq!(graph_name(Path::new("runs/g1.sol")), "g1");
    }

    #[test]
    fn graph_name_is_idempotent() {
        assert_eq!(graph_name(Path::new("g1")), "g1");
        assert_eq!(graph_name(Path::new(graph_name(Path::new("g1.sol")).as_str())), "g1");
    }

    #[test]
    fn verdict_comparison() {
        assert!(Verdict::new(42, 42).is_optimal());
        assert_eq!(
            Verdict::new(42, 50),
            Verdict::Suboptimal {
                optimum: 42,
                num_edges: 50
            }
        );
        assert_eq!(
            Verdict::new(35, 30),
            Verdict::Suboptimal {
                optimum: 35,
                num_edges: 30
            }
        );
    }
}
