//! Result shape returned after a successful analysis run.
//!
//! Returned once and not retained: the durable record is the artifact the
//! tool wrote to the results root.

use serde::{Deserialize, Serialize};

/// Outcome of one orchestrated tool run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Human-readable completion message.
    pub message: String,
    /// Declared output file or directory.
    pub output_location: String,
    /// Display name of the tool that ran.
    pub tool: String,
    /// Captured standard output, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    /// Captured standard error, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    /// Exact command line that was executed.
    pub command_run: String,
    /// Relative paths of every file the run generated, for
    /// directory-producing tools.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_files: Option<Vec<String>>,
}
