//! Error types for the fixture harness.

use std::path::PathBuf;

use thiserror::Error;

/// Problems with the fixture source. Always fatal for the run.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("fixture table must be a JSON object or array, found {found}")]
    UnsupportedShape { found: &'static str },

    #[error("fixture {index}: expected a JSON object, found {found}")]
    RecordNotObject { index: usize, found: &'static str },

    #[error("fixture {index}: missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("fixture {index}: `input` must be an array of arguments, found {found}")]
    InputNotArray { index: usize, found: &'static str },
}

/// A solution refused or failed a single fixture. Never fatal for the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolutionError {
    #[error("expected {expected} argument(s), got {actual}")]
    Arity { expected: usize, actual: usize },

    #[error("argument {position} must be {expected}, found {found}")]
    ArgumentType {
        position: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error("failed writing report: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed appending run log {}: {source}", path.display())]
    RunLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed serializing run log entry: {0}")]
    RunLogEncode(#[from] serde_json::Error),
}
