//! Configuration management for the DFIR workbench.
//!
//! Provides the immutable configuration loaded once at startup and passed by
//! reference into every component: the shared volume roots where tool
//! binaries, input logs, and generated results live, plus the HTTP server
//! settings.

pub mod error;
pub mod prelude;
pub mod workbench_config;

pub use workbench_config::{PathsConfig, ServerConfig, WorkbenchConfig};
