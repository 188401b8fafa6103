//! DFIR Workbench API daemon entry point.
//!
//! Initializes logging, loads the workbench configuration, and serves the
//! API until a shutdown signal arrives. The configuration file path comes
//! from `DFIRD_CONFIG`; without it the defaults match the container volume
//! layout (`/tools`, `/data`, `/data/results`).

use std::path::Path;

use dfir_config::WorkbenchConfig;
use dfird::{api, prelude::*, state::WorkbenchState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::var("DFIRD_CONFIG") {
        Ok(path) => WorkbenchConfig::from_file(Path::new(&path))?,
        Err(_) => WorkbenchConfig::default(),
    };
    info!(
        "tools: {}, data: {}, results: {}",
        config.paths.tools_dir.display(),
        config.paths.data_dir.display(),
        config.paths.results_dir.display()
    );

    let state = WorkbenchState::new(&config);
    let app = api::app(state, &config.server.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutting down");
}
