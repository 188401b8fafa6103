//! Request shapes accepted by the analysis endpoints.

use serde::{Deserialize, Serialize};

/// Run a tool against one input log from the data root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Name of the log file inside the data root.
    pub log_file: String,
}

/// Run a Hayabusa keyword search against one input log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Name of the log file inside the data root.
    pub log_file: String,
    /// Keyword to search for; becomes part of the output file name.
    pub keyword: String,
}

/// Run Takajo against a previously-produced Hayabusa JSONL report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakajoRequest {
    /// Path of the report, absolute or relative to the results root.
    pub hayabusa_report_file: String,
}
