//! Report Pipeline
//!
//! End-to-end flow: extract requirements from raw text, render SQL
//! through the configured backend, execute, and summarize. An empty
//! result set is not a failure; the report carries a warning and comes
//! back otherwise valid.

use serde::{Deserialize, Serialize};

use crate::backend::{BackendResult, SqlBackend};
use crate::config::Config;
use crate::intent::{extract_requirements, Requirements};
use crate::report::{summarize, Summary};
use crate::sql::value::Row;
use crate::sql::{inline_literals, SqlRequest};

/// Warning attached when a query returns no rows
pub const NO_DATA_WARNING: &str =
    "No data returned. Check DB connection string and schema mapping.";

/// Complete report bundle for one raw-text request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// The intent the text was distilled into
    pub requirements: Requirements,
    /// The rendered SQL; with `output_sql_only` this is the preview
    /// form with parameter values inlined as literals
    pub sql: String,
    /// Result rows, empty in SQL-only mode
    pub data: Vec<Row>,
    /// Summary statistics, absent in SQL-only mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<Summary>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Run the full extract-render-execute-summarize pipeline.
///
/// With `output_sql_only`, the pipeline stops after rendering and
/// returns the statement with parameters inlined for inspection; the
/// previewed string is never executed.
pub async fn run_report_pipeline(
    raw_text: &str,
    output_sql_only: bool,
    config: &Config,
    backend: &dyn SqlBackend,
) -> BackendResult<Report> {
    tracing::info!(raw_text, output_sql_only, "running report pipeline");

    let requirements = extract_requirements(raw_text);
    let request = SqlRequest {
        requirements: requirements.clone(),
    };
    let rendered = backend.generate_sql(&request).await?;

    if output_sql_only {
        let preview = inline_literals(&rendered);
        tracing::info!(%preview, "returning SQL preview");
        return Ok(Report {
            requirements,
            sql: preview,
            data: Vec::new(),
            report: None,
            warnings: Vec::new(),
        });
    }

    let result = backend.run_query(&rendered).await?;
    let summary = summarize(&result.rows, &config.report.metric_column);

    let mut warnings = Vec::new();
    if result.rows.is_empty() {
        warnings.push(NO_DATA_WARNING.to_string());
    }

    tracing::info!(
        rows = result.rows.len(),
        warnings = warnings.len(),
        "report pipeline complete"
    );
    Ok(Report {
        requirements,
        sql: rendered.sql,
        data: result.rows,
        report: Some(summary),
        warnings,
    })
}
