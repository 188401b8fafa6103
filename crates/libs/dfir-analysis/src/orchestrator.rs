//! Per-request analysis pipeline.
//!
//! Every run follows the same shape: validate the inputs and the tool
//! installation, compute the deterministic output location, remove any stale
//! artifact there, invoke the binary with its exact argument vector, and
//! collect what it wrote. All coordination is via the filesystem; the only
//! in-process state is a table of per-output-path locks so two concurrent
//! requests for the same output serialize instead of interleaving a cleanup
//! with a live run.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use dfir_artifacts::{guard, store};
use dfir_config::WorkbenchConfig;
use dfir_io::{CapturedRun, ToolCommand};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;

use crate::{
    prelude::*,
    report::AnalysisReport,
    request::{AnalyzeRequest, SearchRequest, TakajoRequest},
    tool::{Tool, ToolKind, ToolSet},
};

/// Suffix Hayabusa gives its JSONL timeline reports.
pub const REPORT_SUFFIX: &str = "-hayabusa-report.jsonl";
/// Suffix of the Takajo output directory derived from a report name.
pub const ANALYSIS_SUFFIX: &str = "-takajo-analysis";

/// Orchestrates the external analysis tools over the shared volumes.
pub struct Orchestrator {
    data_dir: PathBuf,
    results_dir: PathBuf,
    tools: ToolSet,
    run_locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl Orchestrator {
    /// Build the orchestrator from the startup configuration.
    pub fn new(config: &WorkbenchConfig) -> Self {
        Self {
            data_dir: config.paths.data_dir.clone(),
            results_dir: config.paths.results_dir.clone(),
            tools: ToolSet::from_config(config),
            run_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The tool descriptors.
    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    /// Root holding the input log files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Root holding all generated output.
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Run Hayabusa `json-timeline` on one log from the data root.
    pub async fn run_timeline(&self, request: &AnalyzeRequest) -> Result<AnalysisReport> {
        let tool = self.require_installed(ToolKind::Hayabusa)?;
        let log_path = self.resolve_log(&request.log_file)?;
        let output = self
            .results_dir
            .join(format!("{}{}", request.log_file, REPORT_SUFFIX));

        let cmd = ToolCommand::new(&tool.binary, &tool.dir)
            .arg("json-timeline")
            .arg("-f")
            .arg(&log_path)
            .arg("-o")
            .arg(&output)
            .arg("-L")
            .arg("--no-wizard");

        let (run, _) = self.execute(&cmd, &output, false).await?;
        Ok(AnalysisReport {
            message: format!("Hayabusa analysis complete for {}", request.log_file),
            output_location: output.to_string_lossy().into_owned(),
            tool: tool.kind.display_name().to_owned(),
            stdout: Some(run.stdout),
            stderr: Some(run.stderr),
            command_run: cmd.command_line(),
            generated_files: None,
        })
    }

    /// Run Hayabusa `search` for a keyword on one log from the data root.
    pub async fn run_search(&self, request: &SearchRequest) -> Result<AnalysisReport> {
        let tool = self.require_installed(ToolKind::Hayabusa)?;
        let log_path = self.resolve_log(&request.log_file)?;
        if request.keyword.trim().is_empty() {
            return Err(Error::InvalidParameter(String::from(
                "keyword must not be empty",
            )));
        }
        // The keyword lands verbatim in the output file name.
        let keyword = guard::sanitize_component(&request.keyword)?;
        let output = self
            .results_dir
            .join(format!("{}-search-{}.csv", request.log_file, keyword));

        let cmd = ToolCommand::new(&tool.binary, &tool.dir)
            .arg("search")
            .arg("-f")
            .arg(&log_path)
            .arg("-k")
            .arg(keyword)
            .arg("-o")
            .arg(&output);

        let (run, _) = self.execute(&cmd, &output, false).await?;
        Ok(AnalysisReport {
            message: format!(
                "Hayabusa search for '{}' complete on {}",
                keyword, request.log_file
            ),
            output_location: output.to_string_lossy().into_owned(),
            tool: String::from("Hayabusa Search"),
            stdout: Some(run.stdout),
            stderr: Some(run.stderr),
            command_run: cmd.command_line(),
            generated_files: None,
        })
    }

    /// Run Chainsaw `hunt` on one log from the data root.
    pub async fn run_hunt(&self, request: &AnalyzeRequest) -> Result<AnalysisReport> {
        let tool = self.require_installed(ToolKind::Chainsaw)?;
        let log_path = self.resolve_log(&request.log_file)?;
        let output = self
            .results_dir
            .join(format!("{}-chainsaw-report.json", request.log_file));

        let cmd = ToolCommand::new(&tool.binary, &tool.dir)
            .arg("hunt")
            .arg("-f")
            .arg(&log_path)
            .arg("--json")
            .arg("-o")
            .arg(&output)
            .arg("--no-banner");

        let (run, _) = self.execute(&cmd, &output, false).await?;
        Ok(AnalysisReport {
            message: format!("Chainsaw analysis complete for {}", request.log_file),
            output_location: output.to_string_lossy().into_owned(),
            tool: tool.kind.display_name().to_owned(),
            stdout: Some(run.stdout),
            stderr: Some(run.stderr),
            command_run: cmd.command_line(),
            generated_files: None,
        })
    }

    /// Run Takajo `automagic` on a previously-produced Hayabusa report.
    ///
    /// The report is taken as given (no check that Hayabusa produced it),
    /// but it must resolve inside the results root and carry the report
    /// suffix, from which the output directory name derives. After a
    /// successful run the generated tree is listed into the report.
    pub async fn run_automagic(&self, request: &TakajoRequest) -> Result<AnalysisReport> {
        let tool = self.require_installed(ToolKind::Takajo)?;
        let report_path =
            guard::resolve_existing_file(&self.results_dir, &request.hayabusa_report_file)?;
        let output_dir = derive_analysis_dir(&report_path)?;

        let cmd = ToolCommand::new(&tool.binary, &tool.dir)
            .arg("automagic")
            .arg("-t")
            .arg(&report_path)
            .arg("-o")
            .arg(&output_dir);

        let (run, generated) = self.execute(&cmd, &output_dir, true).await?;
        Ok(AnalysisReport {
            message: format!(
                "Takajo 'automagic' analysis complete for {}",
                request.hayabusa_report_file
            ),
            output_location: output_dir.to_string_lossy().into_owned(),
            tool: tool.kind.display_name().to_owned(),
            stdout: Some(run.stdout),
            stderr: Some(run.stderr),
            command_run: cmd.command_line(),
            generated_files: generated,
        })
    }

    /// Cleaning + Running + Collecting, serialized per output location.
    ///
    /// The output may legitimately be absent after a successful run of a
    /// single-file tool; only directory-producing runs list their tree.
    async fn execute(
        &self,
        cmd: &ToolCommand,
        output: &Path,
        collect_tree: bool,
    ) -> Result<(CapturedRun, Option<Vec<String>>)> {
        let _guard = self.lock_output(output).await;
        store::remove_if_exists(output)?;
        info!("running command: {}", cmd.command_line());
        let run = cmd.run().await?;
        let generated = if collect_tree {
            Some(store::list_tree(output)?)
        } else {
            None
        };
        Ok((run, generated))
    }

    async fn lock_output(&self, output: &Path) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.run_locks.lock().await;
            locks.entry(output.to_path_buf()).or_default().clone()
        };
        lock.lock_owned().await
    }

    fn resolve_log(&self, log_file: &str) -> Result<PathBuf> {
        let name = guard::sanitize_component(log_file)?;
        Ok(guard::resolve_existing_file(&self.data_dir, name)?)
    }

    fn require_installed(&self, kind: ToolKind) -> Result<&Tool> {
        let tool = self.tools.get(kind);
        if !tool.is_installed() {
            return Err(Error::ToolMissing {
                name: tool.kind.display_name().to_owned(),
                path: tool.binary.to_string_lossy().into_owned(),
            });
        }
        Ok(tool)
    }
}

/// Derive the Takajo output directory from the report file name: the report
/// suffix is replaced by the analysis suffix. A name without the report
/// suffix is invalid: a plain textual replace would alias the output onto
/// the input and the pre-run cleanup would then delete the report itself.
fn derive_analysis_dir(report_path: &Path) -> Result<PathBuf> {
    let name = report_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::InvalidParameter(String::from("report file name is not valid UTF-8"))
        })?;
    let stem = name.strip_suffix(REPORT_SUFFIX).ok_or_else(|| {
        Error::InvalidParameter(format!(
            "expected a Hayabusa report name ending in {REPORT_SUFFIX}"
        ))
    })?;
    Ok(report_path.with_file_name(format!("{stem}{ANALYSIS_SUFFIX}")))
}
