//! DFIR Workbench API daemon (dfird)
//!
//! A thin HTTP orchestration layer over the external forensic analysis
//! binaries mounted on the shared tools volume. It provides:
//!
//! - **Analysis endpoints**: run Hayabusa (timeline / keyword search),
//!   Chainsaw (rule hunting), and Takajo (report aggregation) against log
//!   files on the data volume
//! - **Artifact endpoints**: list input logs and generated results, serve
//!   result files as text, and re-serve JSONL reports as JSON arrays
//!
//! All state lives on the shared filesystem; the daemon itself keeps no
//! durable state between requests.

pub mod api;
pub mod error;
pub mod prelude;
pub mod state;
