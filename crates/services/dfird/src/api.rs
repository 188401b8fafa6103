//! Router and request handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use dfir_analysis::{AnalysisReport, AnalyzeRequest, SearchRequest, TakajoRequest, ToolStatus};
use dfir_artifacts::{guard, store};
use serde_json::{Value, json};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use crate::prelude::*;
use crate::state::WorkbenchState;

/// Build the application router with tracing and CORS layers applied.
pub fn app(state: WorkbenchState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(read_root))
        .route("/tools", get(check_tools))
        .route("/logs", get(get_logs))
        .route("/logs/results", get(get_result_logs))
        .route(
            "/results_file/{analysis_directory}/{*file_name}",
            get(get_result_file),
        )
        .route("/results_file_json/{*file_name}", get(get_result_file_json))
        .route("/analyze/hayabusa", post(analyze_hayabusa))
        .route("/analyze/hayabusa/search", post(analyze_hayabusa_search))
        .route("/analyze/chainsaw", post(analyze_chainsaw))
        .route("/analyze/takajo", post(analyze_takajo))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(cors)
        .with_state(state)
}

/// Simple health check.
async fn read_root() -> Json<Value> {
    Json(json!({ "message": "DFIR Workbench API is running" }))
}

/// Report whether each tool binary exists on the tools volume.
async fn check_tools(State(state): State<WorkbenchState>) -> Json<Vec<ToolStatus>> {
    let statuses: Vec<ToolStatus> = state
        .orchestrator()
        .tools()
        .all()
        .iter()
        .map(|tool| {
            let status = tool.status();
            if !status.exists {
                warn!("tool not found at: {}", status.path);
            }
            status
        })
        .collect();
    Json(statuses)
}

/// List the input log files on the data volume.
async fn get_logs(State(state): State<WorkbenchState>) -> Json<Vec<String>> {
    Json(store::list_flat(state.orchestrator().data_dir()))
}

/// List the flat result files on the results volume.
async fn get_result_logs(State(state): State<WorkbenchState>) -> Json<Vec<String>> {
    Json(store::list_flat(state.orchestrator().results_dir()))
}

/// Serve one file from an analysis directory as `text/plain`.
///
/// Both segments come from the client; each is resolved through the guard
/// before any read.
async fn get_result_file(
    State(state): State<WorkbenchState>,
    Path((analysis_directory, file_name)): Path<(String, String)>,
) -> Result<Response> {
    let results = state.orchestrator().results_dir();
    let directory = guard::resolve_existing_dir(results, &analysis_directory)?;
    let file = guard::resolve_existing_file(&directory, &file_name)?;

    let body = tokio::fs::read(&file).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response())
}

/// Serve a JSONL report from the results root as a single JSON array.
///
/// Traversal is checked before the extension, so an escape attempt is
/// always 403 regardless of what the name ends with.
async fn get_result_file_json(
    State(state): State<WorkbenchState>,
    Path(file_name): Path<String>,
) -> Result<Json<Vec<Value>>> {
    let results = state.orchestrator().results_dir();
    let file = guard::resolve_existing_file(results, &file_name)?;
    Ok(Json(store::read_json_lines(&file)?))
}

/// Run Hayabusa `json-timeline` on a log file.
async fn analyze_hayabusa(
    State(state): State<WorkbenchState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>> {
    Ok(Json(state.orchestrator().run_timeline(&request).await?))
}

/// Run Hayabusa `search` on a log file with a keyword.
async fn analyze_hayabusa_search(
    State(state): State<WorkbenchState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<AnalysisReport>> {
    Ok(Json(state.orchestrator().run_search(&request).await?))
}

/// Run Chainsaw `hunt` on a log file.
async fn analyze_chainsaw(
    State(state): State<WorkbenchState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>> {
    Ok(Json(state.orchestrator().run_hunt(&request).await?))
}

/// Run Takajo `automagic` on a Hayabusa JSONL report.
async fn analyze_takajo(
    State(state): State<WorkbenchState>,
    Json(request): Json<TakajoRequest>,
) -> Result<Json<AnalysisReport>> {
    Ok(Json(state.orchestrator().run_automagic(&request).await?))
}
