//! Core configuration types for the DFIR workbench.

use crate::prelude::*;
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API listens on.
    pub bind_addr: SocketAddr,
    /// Origins allowed by the CORS layer.
    pub cors_origins: Vec<String>,
}

/// Shared volume roots provisioned by the container runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root containing one subdirectory per tool binary.
    pub tools_dir: PathBuf,
    /// Root containing the input log files.
    pub data_dir: PathBuf,
    /// Root containing all generated output, flat or nested per tool.
    pub results_dir: PathBuf,
}

impl PathsConfig {
    /// Install directory of a tool under the tools root.
    pub fn tool_dir(&self, name: &str) -> PathBuf {
        self.tools_dir.join(name)
    }
}

/// Immutable workbench configuration, constructed once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbenchConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Shared volume roots.
    pub paths: PathsConfig,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
                cors_origins: vec![
                    String::from("http://localhost"),
                    String::from("http://localhost:3000"),
                ],
            },
            paths: PathsConfig {
                tools_dir: PathBuf::from("/tools"),
                data_dir: PathBuf::from("/data"),
                results_dir: PathBuf::from("/data/results"),
            },
        }
    }
}

impl WorkbenchConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(file_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(file_path)?;
        Ok(Self::from_toml(&contents)?)
    }

    /// Parse configuration from TOML string.
    pub fn from_toml(value: &str) -> Result<Self> {
        Ok(toml::from_str(value)?)
    }
}
