//! Orchestration error types.

/// Errors that can occur while orchestrating an analysis run.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Path resolution or artifact access failed.
    #[error(transparent)]
    Artifact(#[from] dfir_artifacts::error::Error),

    /// The external process failed to launch or exited nonzero.
    #[error(transparent)]
    Process(#[from] dfir_io::error::Error),

    /// The tool binary is not installed where the configuration says it
    /// should be. An operator misconfiguration, not a missing input.
    #[error("{name} binary not found at {path}")]
    ToolMissing {
        /// Tool display name.
        name: String,
        /// Expected binary path.
        path: String,
    },

    /// A request parameter failed validation.
    #[error("{0}")]
    InvalidParameter(String),
}
