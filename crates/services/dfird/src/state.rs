//! Shared request state.

use std::sync::Arc;

use dfir_analysis::Orchestrator;
use dfir_config::WorkbenchConfig;

/// State handed to every handler: the orchestrator and, through it, the
/// volume roots. Cheap to clone; all fields are immutable after startup.
#[derive(Clone)]
pub struct WorkbenchState {
    orchestrator: Arc<Orchestrator>,
}

impl WorkbenchState {
    /// Build the state from the startup configuration.
    pub fn new(config: &WorkbenchConfig) -> Self {
        Self {
            orchestrator: Arc::new(Orchestrator::new(config)),
        }
    }

    /// The analysis orchestrator.
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}
