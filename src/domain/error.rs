use thiserror::Error;

pub type SteinerResult<T> = std::result::Result<T, SteinerError>;

/// Failures of the graph model, the path finder and the Steiner tree builder.
///
/// None of these are retried: a failed merge round invalidates the whole
/// computation, since a partial tree is not a lower bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SteinerError {
    #[error("invalid terminal set: {0}")]
    InvalidTerminalSet(String),

    #[error("no path between node {from} and node {to}")]
    NoPath { from: usize, to: usize },

    #[error("node {0} is not part of the graph")]
    UnknownNode(usize),

    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    #[error("node costs overflow the cost range")]
    CostOverflow,

    #[error("computation cancelled after {rounds} merge round(s)")]
    Cancelled { rounds: usize },
}

/// Failures while reading or extending a `.cor` instance file.
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed instance (line {line}): {message}")]
    Malformed { line: usize, message: String },
}

impl InstanceError {
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }
}
