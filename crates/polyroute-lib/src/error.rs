use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the polyroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A header or data line in a poly source could not be parsed.
    #[error("invalid poly input at line {line}: {message}")]
    Format { line: usize, message: String },

    /// The graph source could not be located at the resolved path.
    #[error("graph source not found at {path}")]
    SourceNotFound { path: PathBuf },

    /// Neither an explicit path nor `POLYROUTE_GRAPH` named a graph source.
    #[error("no graph source configured; pass --graph or set POLYROUTE_GRAPH")]
    GraphPathUnset,

    /// Raised when an edge references a vertex the graph does not contain.
    #[error("vertex {id} does not exist (graph has {count} vertices)")]
    UnknownVertex { id: usize, count: usize },

    /// Raised when a selection or query cannot be honoured.
    #[error("invalid selection: {reason}")]
    InvalidSelection { reason: String },

    /// Raised when a vertex is appended with a NaN or infinite coordinate.
    #[error("vertex coordinates must be finite, got ({x}, {y})")]
    InvalidCoordinate { x: f64, y: f64 },

    /// A background query worker stopped before reporting a result.
    #[error("query {token} aborted: {message}")]
    QueryAborted { token: u64, message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Error::Format {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_selection(reason: impl Into<String>) -> Self {
        Error::InvalidSelection {
            reason: reason.into(),
        }
    }
}
