//! SQL Engine Routes
//!
//! Server-side rendering and execution endpoints. These always run
//! in-process against the configured report settings; the backend
//! facade's HTTP mode is a client of these same endpoints.
//!
//! - POST /mcp/sql/generate - Render SQL from a structured intent
//! - POST /mcp/sql/render - Render SQL from a template request
//! - POST /mcp/sql/query - Bind and execute a rendered statement

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::sql::{self, QueryResponse, SqlRequest, SqlResponse, TemplateRequest};

/// POST /mcp/sql/generate
///
/// Render a parameterized statement from extracted requirements.
pub async fn generate_sql(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SqlRequest>,
) -> ApiResult<Json<SqlResponse>> {
    tracing::info!(metric = %payload.requirements.metric, "generate_sql request");
    let response = sql::render_intent(&payload.requirements, &state.config.report)?;
    Ok(Json(response))
}

/// POST /mcp/sql/render
///
/// Render a whitelisted template request. Fails with 400
/// `Column not allowed: {name}` when a requested column is outside the
/// whitelist.
pub async fn render_template(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TemplateRequest>,
) -> ApiResult<Json<SqlResponse>> {
    tracing::info!(filters = payload.filters.len(), "render_template request");
    let response = sql::render_template(&payload, &state.config.report)?;
    Ok(Json(response))
}

/// POST /mcp/sql/query
///
/// Bind named parameters and execute. Fails with 400
/// `Missing parameter: {name}` when the statement references a name the
/// parameter map does not supply.
pub async fn run_query(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SqlResponse>,
) -> ApiResult<Json<QueryResponse>> {
    tracing::info!(parameters = payload.parameters.len(), "run_query request");
    let response = sql::run_query(&payload, &state.config.database.connection_string)?;
    tracing::info!(rows = response.rows.len(), "run_query complete");
    Ok(Json(response))
}
