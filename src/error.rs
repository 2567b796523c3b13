//! Error type shared by every stage of a run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a run.
#[derive(Error, Debug)]
pub enum Error {
    /// A line of an edge-list file could not be read as `weight,node1,node2`.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    /// An input file could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A solver returned a value outside of {-1, +1} for a node.
    #[error("node {node} has value {value}, expected -1 or +1")]
    Domain { node: i64, value: i64 },
    /// An assignment does not cover every variable of the model.
    #[error("no spin given for variable {0}")]
    MissingVariable(i64),
    #[error("solver failed: {0}")]
    Solver(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Error::Parse {
            line,
            reason: reason.into(),
        }
    }
}
