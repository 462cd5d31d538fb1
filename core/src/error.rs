use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Every failure the engine can report. Existing state is never modified
/// when one of these is returned.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A dataset line that is not exactly two unsigned integers.
    #[error("format error on line {line}: {reason}")]
    Format { line: usize, reason: String },

    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("node {0} not found in loaded graph")]
    UnknownNode(NodeId),

    #[error("no graph loaded, call load() first")]
    NoGraphLoaded,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("graph needs ~{estimated_mb}MB, exceeds max_memory_mb={max_mb}MB")]
    MemoryLimit { estimated_mb: usize, max_mb: usize },

    #[error("graph has no nodes")]
    EmptyGraph,
}

impl GraphError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GraphError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        GraphError::Format {
            line,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_names_line() {
        let err = GraphError::format(7, "expected 2 tokens, found 3");
        assert_eq!(
            err.to_string(),
            "format error on line 7: expected 2 tokens, found 3"
        );
    }

    #[test]
    fn test_io_error_names_path() {
        let err = GraphError::io(
            "missing.txt",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().contains("missing.txt"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
