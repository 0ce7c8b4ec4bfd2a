//! SQL engine wire types
//!
//! Request and response shapes shared by the in-process backend, the
//! HTTP proxy backend, and the API layer. Serialized forms are identical
//! in both transport modes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::intent::Requirements;
use crate::sql::value::{Row, SqlValue};

/// Request for the intent rendering path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlRequest {
    pub requirements: Requirements,
}

/// Request for the template rendering path
///
/// `filters` accepts arbitrary keys; only `start_dt`/`end_dt` and `date`
/// are recognized, the rest are ignored by policy. Unknown top-level
/// fields (such as a template name) are likewise accepted and ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateRequest {
    /// Columns to project; defaults to the configured time and metric
    /// columns when empty or absent
    #[serde(default)]
    pub columns: Option<Vec<String>>,

    /// Filter values keyed by recognized filter name
    #[serde(default)]
    pub filters: BTreeMap<String, SqlValue>,

    /// ORDER BY expression, appended verbatim; trusted callers only
    #[serde(default)]
    pub order: Option<String>,

    /// Positive row limit
    #[serde(default)]
    pub limit: Option<u32>,
}

/// A rendered SQL statement with its named parameters
///
/// Every `:name` placeholder in `sql` has a matching key in
/// `parameters`. Extra keys are tolerated; the binder resolves only the
/// names the statement references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlResponse {
    pub sql: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, SqlValue>,
}

/// Materialized query result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    pub rows: Vec<Row>,
}

impl QueryResponse {
    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_request_tolerates_unknown_fields() {
        let req: TemplateRequest = serde_json::from_str(
            r#"{"template": "hourly", "filters": {"date": "2024-01-01"}, "limit": 5}"#,
        )
        .unwrap();
        assert_eq!(req.limit, Some(5));
        assert_eq!(
            req.filters.get("date"),
            Some(&SqlValue::Text("2024-01-01".into()))
        );
        assert!(req.columns.is_none());
    }

    #[test]
    fn test_sql_response_defaults_parameters() {
        let resp: SqlResponse = serde_json::from_str(r#"{"sql": "SELECT 1"}"#).unwrap();
        assert!(resp.parameters.is_empty());
    }
}
