//! Captured execution of external analysis tools.

use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::Stdio,
};

use tokio::process::Command;
use tracing::debug;

use crate::prelude::*;

/// Output captured from a completed tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRun {
    /// Full standard output as text.
    pub stdout: String,
    /// Full standard error as text.
    pub stderr: String,
}

/// An external tool invocation: program, argument vector, and the fixed
/// working directory the tool expects to run from.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
    cwd: PathBuf,
}

impl ToolCommand {
    /// Create a command for `program` running inside `cwd`.
    pub fn new(program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// The exact command line, rendered for diagnostics and reported back
    /// to the caller as `command_run`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dfir_io::runner::ToolCommand;
    ///
    /// let cmd = ToolCommand::new("/bin/echo", "/tmp").arg("-n").arg("hi");
    /// assert_eq!(cmd.command_line(), "/bin/echo -n hi");
    /// ```
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }

    /// Program path as text, for error reporting.
    pub fn program(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Working directory the tool runs from.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Run the tool to completion, capturing stdout and stderr.
    ///
    /// The caller's task suspends until the subprocess exits; there is no
    /// retry and no deadline. A spawn failure is reported as
    /// [`Error::LaunchFailed`], a nonzero exit as [`Error::ToolFailed`]
    /// carrying the captured output verbatim.
    pub async fn run(&self) -> Result<CapturedRun> {
        debug!("spawning: {}", self.command_line());

        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| Error::LaunchFailed {
                program: self.program(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(Error::ToolFailed {
                program: self.program(),
                code: output.status.code(),
                stdout,
                stderr,
            });
        }

        Ok(CapturedRun { stdout, stderr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_stdout_and_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = ToolCommand::new("/bin/sh", dir.path())
            .arg("-c")
            .arg("echo report line; echo diagnostics >&2");

        let run = cmd.run().await.unwrap();
        assert_eq!(run.stdout, "report line\n");
        assert_eq!(run.stderr, "diagnostics\n");
    }

    #[tokio::test]
    async fn runs_in_the_given_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = ToolCommand::new("/bin/sh", dir.path()).arg("-c").arg("pwd");

        let run = cmd.run().await.unwrap();
        let reported = run.stdout.trim();
        assert_eq!(
            std::fs::canonicalize(reported).unwrap(),
            std::fs::canonicalize(dir.path()).unwrap()
        );
    }

    #[tokio::test]
    async fn nonzero_exit_surfaces_output_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = ToolCommand::new("/bin/sh", dir.path())
            .arg("-c")
            .arg("echo partial; echo broken input >&2; exit 3");

        let err = cmd.run().await.unwrap_err();
        match err {
            Error::ToolFailed {
                code,
                stdout,
                stderr,
                ..
            } => {
                assert_eq!(code, Some(3));
                assert_eq!(stdout, "partial\n");
                assert_eq!(stderr, "broken input\n");
            }
            other => panic!("expected ToolFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_binary_is_a_launch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = ToolCommand::new(dir.path().join("no-such-tool"), dir.path());

        let err = cmd.run().await.unwrap_err();
        assert!(matches!(err, Error::LaunchFailed { .. }));
    }

    #[test]
    fn command_line_preserves_argument_order() {
        let cmd = ToolCommand::new("/tools/hayabusa/hayabusa", "/tools/hayabusa")
            .arg("json-timeline")
            .arg("-f")
            .arg("/data/evtx1.evtx")
            .arg("-o")
            .arg("/data/results/evtx1.evtx-hayabusa-report.jsonl")
            .arg("-L")
            .arg("--no-wizard");

        assert_eq!(
            cmd.command_line(),
            "/tools/hayabusa/hayabusa json-timeline -f /data/evtx1.evtx \
             -o /data/results/evtx1.evtx-hayabusa-report.jsonl -L --no-wizard"
        );
    }
}
