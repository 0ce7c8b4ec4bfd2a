//! Report Summarization
//!
//! Reduces query rows to headline statistics over the metric column.
//! Average, min, and max appear only when at least one row carries a
//! numeric value for the metric; otherwise the summary reports the row
//! count alone.

use serde::{Deserialize, Serialize};

use crate::sql::value::Row;

/// Headline statistics for a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Human-readable outcome line
    pub summary: String,
    /// Number of rows the query returned
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Summarize query rows over the named metric column
pub fn summarize(rows: &[Row], metric_key: &str) -> Summary {
    tracing::debug!(rows = rows.len(), metric_key, "generating summary");

    if rows.is_empty() {
        return Summary {
            summary: "No data returned for the query.".to_string(),
            count: 0,
            average: None,
            min: None,
            max: None,
        };
    }

    let values: Vec<f64> = rows
        .iter()
        .filter_map(|row| row.get(metric_key).and_then(|v| v.as_f64()))
        .collect();

    if values.is_empty() {
        return Summary {
            summary: "No numeric metric values found in query results.".to_string(),
            count: rows.len(),
            average: None,
            min: None,
            max: None,
        };
    }

    let sum: f64 = values.iter().sum();
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    Summary {
        summary: "Report generated from query results.".to_string(),
        count: rows.len(),
        average: Some(sum / values.len() as f64),
        min: Some(min),
        max: Some(max),
    }
}
