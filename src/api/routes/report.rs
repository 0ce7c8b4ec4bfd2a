//! Report Routes
//!
//! - POST /report - Run the full report pipeline
//! - POST /extract - Extract structured requirements only

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::ReportRequest;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::intent::{extract_requirements, Requirements};
use crate::workflow::{run_report_pipeline, Report};

/// POST /report
///
/// Run the extract-render-execute-summarize pipeline over raw text.
/// With `output_sql_only` the pipeline stops after rendering and
/// returns a SQL preview with parameters inlined.
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReportRequest>,
) -> ApiResult<Json<Report>> {
    let report = run_report_pipeline(
        &payload.raw_text,
        payload.output_sql_only,
        &state.config,
        state.backend.as_ref(),
    )
    .await?;
    Ok(Json(report))
}

/// POST /extract
///
/// Extract structured requirements from raw text without rendering.
pub async fn extract_only(Json(payload): Json<ReportRequest>) -> Json<Requirements> {
    Json(extract_requirements(&payload.raw_text))
}
