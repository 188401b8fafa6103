//! Main crate error and the single error → HTTP status mapping.
//!
//! Failure responses carry a human-readable message and, for a tool that
//! ran and failed, the captured stdout/stderr verbatim: the primary consumer
//! is an investigator debugging a failed forensic run without server-side
//! log access. Internal errors are logged in full here and reported
//! generically to the client.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::error;

/// Errors surfaced at the API boundary.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Analysis(#[from] dfir_analysis::error::Error),

    #[error(transparent)]
    Artifact(#[from] dfir_artifacts::error::Error),

    #[error(transparent)]
    Config(#[from] dfir_config::error::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

fn artifact_response(err: &dfir_artifacts::error::Error) -> (StatusCode, String) {
    use dfir_artifacts::error::Error as Artifact;
    match err {
        Artifact::Forbidden => (StatusCode::FORBIDDEN, String::from("Access forbidden")),
        Artifact::NotFound(what) => (StatusCode::NOT_FOUND, format!("Not found: {what}")),
        Artifact::NotJsonl(_) => (
            StatusCode::NOT_FOUND,
            String::from("JSONL file not found"),
        ),
        Artifact::JsonLine { line, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Malformed JSONL content on line {line}"),
        ),
        Artifact::Cleanup { path, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to remove old artifact at {path}"),
        ),
        Artifact::IO(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            String::from("Internal server error"),
        ),
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        use dfir_analysis::error::Error as Analysis;
        use dfir_io::error::Error as Process;

        error!("Creating API error response for error: {:?}", self);

        let mut tool_stdout = None;
        let mut tool_stderr = None;
        let (status, message) = match &self {
            Error::Artifact(err) => artifact_response(err),
            Error::Analysis(Analysis::Artifact(err)) => artifact_response(err),
            Error::Analysis(Analysis::Process(Process::LaunchFailed { program, .. })) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to launch {program}"),
            ),
            Error::Analysis(Analysis::Process(Process::ToolFailed {
                program,
                stdout,
                stderr,
                ..
            })) => {
                tool_stdout = Some(stdout.clone());
                tool_stderr = Some(stderr.clone());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{program} failed"),
                )
            }
            Error::Analysis(err @ Analysis::ToolMissing { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            Error::Analysis(Analysis::InvalidParameter(message)) => {
                (StatusCode::BAD_REQUEST, message.clone())
            }
            Error::Config(_) | Error::IO(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("Internal server error"),
            ),
        };

        let mut detail = json!({
            "message": message,
            "status": status.as_u16(),
        });
        if let Some(stdout) = tool_stdout {
            detail["stdout"] = json!(stdout);
        }
        if let Some(stderr) = tool_stderr {
            detail["stderr"] = json!(stderr);
        }

        (status, Json(json!({ "error": detail }))).into_response()
    }
}
