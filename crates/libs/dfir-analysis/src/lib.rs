//! Analysis orchestration for the DFIR workbench.
//!
//! The workbench does no log analysis of its own: Hayabusa, Chainsaw, and
//! Takajo are opaque binaries installed on a shared volume and invoked over
//! their command-line contracts. This crate owns the tool descriptors and
//! the per-request pipeline around each invocation: validate the inputs,
//! remove any stale output so a re-run never merges old and new content,
//! run the binary, and collect what it declared it would write.

pub mod error;
pub mod orchestrator;
pub mod prelude;
pub mod report;
pub mod request;
pub mod tool;

pub use orchestrator::Orchestrator;
pub use report::AnalysisReport;
pub use request::{AnalyzeRequest, SearchRequest, TakajoRequest};
pub use tool::{Tool, ToolKind, ToolSet, ToolStatus};
