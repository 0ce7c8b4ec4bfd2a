//! Query Executor
//!
//! Binds a rendered statement and runs it over a scoped SQLite
//! connection. The connection lives for exactly one call and is
//! released on every exit path. With no connection string configured
//! the executor is a no-op that returns zero rows, which keeps offline
//! and demo setups working without a database.

use rusqlite::Connection;

use crate::sql::bind::bind;
use crate::sql::error::SqlResult;
use crate::sql::types::{QueryResponse, SqlResponse};
use crate::sql::value::{Row, SqlValue};

/// Execute a rendered statement and materialize the result rows.
///
/// Rows preserve the result schema's column order. Driver failures
/// surface as [`SqlError::Execution`](crate::sql::SqlError::Execution),
/// distinct from the binder's `MissingParameter`.
pub fn run_query(response: &SqlResponse, connection_string: &str) -> SqlResult<QueryResponse> {
    if connection_string.is_empty() {
        tracing::info!("no connection string configured, returning zero rows");
        return Ok(QueryResponse::empty());
    }

    let (sql, values) = bind(response)?;
    tracing::debug!(%sql, bound = values.len(), "executing query");

    let conn = Connection::open(connection_string)?;
    let mut stmt = conn.prepare(&sql)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();

    let mut materialized = Vec::new();
    let mut rows = stmt.query(rusqlite::params_from_iter(values.iter()))?;
    while let Some(row) = rows.next()? {
        let mut out = Row::new();
        for (idx, name) in columns.iter().enumerate() {
            out.push(name.clone(), SqlValue::from_sql(row.get_ref(idx)?));
        }
        materialized.push(out);
    }

    tracing::debug!(rows = materialized.len(), "query complete");
    Ok(QueryResponse { rows: materialized })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::error::SqlError;
    use std::collections::BTreeMap;

    fn fixture_db() -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calls.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE calls (event_time TEXT NOT NULL, hold_time_seconds INTEGER);
             INSERT INTO calls VALUES ('2024-01-01 14:05:00', 42);
             INSERT INTO calls VALUES ('2024-01-01 14:20:00', 7);
             INSERT INTO calls VALUES ('2024-01-01 16:00:00', 90);",
        )
        .unwrap();
        let conn_str = path.to_string_lossy().into_owned();
        (dir, conn_str)
    }

    fn response(sql: &str, parameters: &[(&str, SqlValue)]) -> SqlResponse {
        SqlResponse {
            sql: sql.to_string(),
            parameters: parameters
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn test_empty_connection_string_is_noop() {
        // No binding, no validation: the no-op check comes first
        let resp = response("SELECT x FROM t WHERE x = :unbound", &[]);
        let result = run_query(&resp, "").unwrap();
        assert!(result.rows.is_empty());
    }

    #[test]
    fn test_query_with_bound_window() {
        let (_dir, conn_str) = fixture_db();
        let resp = response(
            "SELECT event_time, hold_time_seconds FROM calls \
             WHERE event_time >= :start_dt AND event_time < :end_dt \
             ORDER BY hold_time_seconds ASC",
            &[
                ("start_dt", SqlValue::Text("2024-01-01 14:00:00".into())),
                ("end_dt", SqlValue::Text("2024-01-01 15:00:00".into())),
            ],
        );

        let result = run_query(&resp, &conn_str).unwrap();
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].get("hold_time_seconds"), Some(&SqlValue::Integer(7)));
        assert_eq!(result.rows[1].get("hold_time_seconds"), Some(&SqlValue::Integer(42)));
    }

    #[test]
    fn test_rows_preserve_schema_column_order() {
        let (_dir, conn_str) = fixture_db();
        let resp = response("SELECT hold_time_seconds, event_time FROM calls", &[]);

        let result = run_query(&resp, &conn_str).unwrap();
        let columns: Vec<&str> = result.rows[0].columns().collect();
        assert_eq!(columns, vec!["hold_time_seconds", "event_time"]);
    }

    #[test]
    fn test_missing_parameter_beats_execution() {
        let (_dir, conn_str) = fixture_db();
        let resp = response("SELECT * FROM calls WHERE event_time >= :start_dt", &[]);

        let err = run_query(&resp, &conn_str).unwrap_err();
        assert!(matches!(err, SqlError::MissingParameter(_)));
    }

    #[test]
    fn test_driver_failure_is_execution_error() {
        let (_dir, conn_str) = fixture_db();
        let resp = SqlResponse {
            sql: "SELECT * FROM no_such_table".to_string(),
            parameters: BTreeMap::new(),
        };

        let err = run_query(&resp, &conn_str).unwrap_err();
        assert!(matches!(err, SqlError::Execution(_)));
    }

    #[test]
    fn test_null_cells_materialize() {
        let (_dir, conn_str) = fixture_db();
        let setup = Connection::open(&conn_str).unwrap();
        setup
            .execute("INSERT INTO calls VALUES ('2024-01-01 17:00:00', NULL)", [])
            .unwrap();
        drop(setup);

        let resp = response(
            "SELECT event_time, hold_time_seconds FROM calls WHERE hold_time_seconds IS NULL",
            &[],
        );
        let result = run_query(&resp, &conn_str).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].get("hold_time_seconds"), Some(&SqlValue::Null));
    }
}
