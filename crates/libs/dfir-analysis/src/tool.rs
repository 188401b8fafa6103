//! Descriptors for the external analysis binaries.

use std::path::{Path, PathBuf};

use dfir_config::WorkbenchConfig;
use serde::{Deserialize, Serialize};

/// The three supported analysis tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Windows event-log timeline and event detection engine.
    Hayabusa,
    /// Detection-rule hunting engine.
    Chainsaw,
    /// Aggregator consuming a Hayabusa JSONL report.
    Takajo,
}

impl ToolKind {
    /// Human-readable name reported to clients.
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolKind::Hayabusa => "Hayabusa",
            ToolKind::Chainsaw => "Chainsaw",
            ToolKind::Takajo => "Takajo",
        }
    }

    /// Install directory and binary name under the tools root.
    pub fn binary_name(&self) -> &'static str {
        match self {
            ToolKind::Hayabusa => "hayabusa",
            ToolKind::Chainsaw => "chainsaw",
            ToolKind::Takajo => "takajo",
        }
    }
}

/// A tool descriptor: created at startup, immutable afterwards.
#[derive(Debug, Clone)]
pub struct Tool {
    /// Which tool this is.
    pub kind: ToolKind,
    /// Install directory; the tool's working directory when run.
    pub dir: PathBuf,
    /// Full path to the binary.
    pub binary: PathBuf,
}

impl Tool {
    fn new(kind: ToolKind, tools_dir: &Path) -> Self {
        let dir = tools_dir.join(kind.binary_name());
        let binary = dir.join(kind.binary_name());
        Self { kind, dir, binary }
    }

    /// Whether the binary exists on the shared volume right now.
    pub fn is_installed(&self) -> bool {
        self.binary.exists()
    }

    /// Installation status as reported by `GET /tools`.
    pub fn status(&self) -> ToolStatus {
        ToolStatus {
            name: self.kind.display_name().to_owned(),
            exists: self.is_installed(),
            path: self.binary.to_string_lossy().into_owned(),
        }
    }
}

/// Wire shape for a tool installation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolStatus {
    /// Tool display name.
    pub name: String,
    /// Whether the binary exists.
    pub exists: bool,
    /// Expected binary path.
    pub path: String,
}

/// All three descriptors, built once from the configuration.
#[derive(Debug, Clone)]
pub struct ToolSet {
    hayabusa: Tool,
    chainsaw: Tool,
    takajo: Tool,
}

impl ToolSet {
    /// Build the descriptors from the configured tools root.
    pub fn from_config(config: &WorkbenchConfig) -> Self {
        let tools_dir = &config.paths.tools_dir;
        Self {
            hayabusa: Tool::new(ToolKind::Hayabusa, tools_dir),
            chainsaw: Tool::new(ToolKind::Chainsaw, tools_dir),
            takajo: Tool::new(ToolKind::Takajo, tools_dir),
        }
    }

    /// Descriptor for one tool.
    pub fn get(&self, kind: ToolKind) -> &Tool {
        match kind {
            ToolKind::Hayabusa => &self.hayabusa,
            ToolKind::Chainsaw => &self.chainsaw,
            ToolKind::Takajo => &self.takajo,
        }
    }

    /// All descriptors, in reporting order.
    pub fn all(&self) -> [&Tool; 3] {
        [&self.hayabusa, &self.chainsaw, &self.takajo]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfir_config::WorkbenchConfig;

    #[test]
    fn descriptors_follow_the_tools_root_layout() {
        let config = WorkbenchConfig::default();
        let tools = ToolSet::from_config(&config);

        let hayabusa = tools.get(ToolKind::Hayabusa);
        assert_eq!(hayabusa.dir, Path::new("/tools/hayabusa"));
        assert_eq!(hayabusa.binary, Path::new("/tools/hayabusa/hayabusa"));

        let names: Vec<&str> = tools
            .all()
            .iter()
            .map(|t| t.kind.display_name())
            .collect();
        assert_eq!(names, vec!["Hayabusa", "Chainsaw", "Takajo"]);
    }
}
