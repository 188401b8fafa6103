//! Artifact access error types.

/// Errors raised while resolving or reading artifacts.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Path resolution escaped its root.
    #[error("access forbidden")]
    Forbidden,

    /// The resolved path is inside its root but missing, or is not the
    /// expected kind of entry.
    #[error("not found: {0}")]
    NotFound(String),

    /// The requested file does not carry the JSON-Lines extension.
    #[error("not a JSONL file: {0}")]
    NotJsonl(String),

    /// A JSON-Lines file contained a malformed line. No partial decode is
    /// returned.
    #[error("malformed JSON on line {line}: {source}")]
    JsonLine {
        /// 1-based line number of the malformed line.
        line: usize,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A stale artifact could not be removed before a re-run.
    #[error("failed to remove stale artifact {path}: {source}")]
    Cleanup {
        /// Path that could not be removed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Any other I/O failure.
    #[error(transparent)]
    IO(#[from] std::io::Error),
}
