//! Process execution error types.

/// Errors that can occur while running an external tool.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The binary could not be spawned at all (missing, not executable).
    #[error("failed to launch {program}: {source}")]
    LaunchFailed {
        /// Program that failed to start.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The binary ran but exited with a nonzero status. The captured
    /// stdout/stderr are carried verbatim for the operator.
    #[error("{program} exited with status {code:?}")]
    ToolFailed {
        /// Program that failed.
        program: String,
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },
}
