//! Process execution for the DFIR workbench.
//!
//! Provides the uniform contract for invoking the external analysis binaries:
//! build an exact argument vector with a fixed working directory, run the
//! binary to completion, and capture its exit status together with the full
//! stdout and stderr text.
//!
//! # Usage
//!
//! ```rust,no_run
//! use dfir_io::runner::ToolCommand;
//!
//! #[tokio::main]
//! async fn main() {
//!     let cmd = ToolCommand::new("/tools/hayabusa/hayabusa", "/tools/hayabusa")
//!         .arg("json-timeline")
//!         .arg("-f")
//!         .arg("/data/evtx1.evtx");
//!
//!     println!("running: {}", cmd.command_line());
//!     let captured = cmd.run().await.unwrap();
//!     println!("stdout: {}", captured.stdout);
//! }
//! ```

pub mod error;
pub mod prelude;
pub mod runner;

pub use runner::{CapturedRun, ToolCommand};
