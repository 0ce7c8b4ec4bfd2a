//! SQL Renderer
//!
//! Builds a parameterized SQL statement plus a named-parameter map from
//! either a structured intent or an explicit template request. Column
//! and table identifiers come only from configuration; every
//! user-influenced value travels as a bound parameter, never as SQL
//! text. The one exception is the template path's `order` expression,
//! which is appended verbatim and therefore restricted to trusted
//! server-side callers.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeMap;

use crate::config::ReportConfig;
use crate::intent::{Direction, Requirements};
use crate::sql::error::{SqlError, SqlResult};
use crate::sql::types::{SqlResponse, TemplateRequest};
use crate::sql::value::SqlValue;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render SQL for a structured intent.
///
/// Time filter selection, in priority order: date+time hints become a
/// half-open timestamp window of the configured width; a date hint alone
/// filters on the calendar date; a time hint alone filters on the time
/// of day. Time-of-day window arithmetic wraps past midnight, in which
/// case the half-open filter matches no rows; a window crossing midnight
/// needs a date hint.
pub fn render_intent(req: &Requirements, config: &ReportConfig) -> SqlResult<SqlResponse> {
    let time_col = &config.time_column;
    let metric_col = &config.metric_column;

    let mut where_clauses: Vec<String> = Vec::new();
    let mut parameters: BTreeMap<String, SqlValue> = BTreeMap::new();

    match (req.date_hint.as_deref(), req.time_hint.as_deref()) {
        (Some(date), Some(time)) => {
            let start = NaiveDateTime::new(parse_date_hint(date)?, parse_time_hint(time)?);
            let end = start + Duration::minutes(i64::from(config.window_minutes));
            where_clauses.push(format!(
                "{} >= :start_dt AND {} < :end_dt",
                time_col, time_col
            ));
            parameters.insert(
                "start_dt".to_string(),
                SqlValue::Text(start.format(TIMESTAMP_FORMAT).to_string()),
            );
            parameters.insert(
                "end_dt".to_string(),
                SqlValue::Text(end.format(TIMESTAMP_FORMAT).to_string()),
            );
        }
        (Some(date), None) => {
            parse_date_hint(date)?;
            where_clauses.push(format!("CAST({} AS date) = :date", time_col));
            parameters.insert("date".to_string(), SqlValue::Text(date.to_string()));
        }
        (None, Some(time)) => {
            let start = parse_time_hint(time)?;
            // Wraps past midnight; see the function doc
            let (end, _) =
                start.overflowing_add_signed(Duration::minutes(i64::from(config.window_minutes)));
            where_clauses.push(format!(
                "CAST({} AS time) >= :start_time AND CAST({} AS time) < :end_time",
                time_col, time_col
            ));
            parameters.insert(
                "start_time".to_string(),
                SqlValue::Text(start.format(TIME_FORMAT).to_string()),
            );
            parameters.insert(
                "end_time".to_string(),
                SqlValue::Text(end.format(TIME_FORMAT).to_string()),
            );
        }
        (None, None) => {}
    }

    let mut sql = format!(
        "SELECT {}, {} FROM {}.{}",
        time_col, metric_col, config.schema, config.table
    );
    if !where_clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_clauses.join(" AND "));
    }

    if req.direction == Some(Direction::Low) {
        sql.push_str(&format!(" ORDER BY {} ASC", metric_col));
    }

    tracing::debug!(%sql, params = parameters.len(), "rendered intent SQL");
    Ok(SqlResponse { sql, parameters })
}

/// Render SQL for an explicit template request.
///
/// Projected columns are checked against the whitelist of configured
/// columns. The `order` expression is concatenated verbatim: callers
/// must be trusted server-side intent builders, and raw user text must
/// never reach `order` or `columns` unfiltered.
pub fn render_template(req: &TemplateRequest, config: &ReportConfig) -> SqlResult<SqlResponse> {
    let allowed = [config.time_column.as_str(), config.metric_column.as_str()];

    let columns: Vec<String> = match &req.columns {
        Some(cols) if !cols.is_empty() => cols.clone(),
        _ => allowed.iter().map(|c| c.to_string()).collect(),
    };
    for column in &columns {
        if !allowed.contains(&column.as_str()) {
            return Err(SqlError::InvalidColumn(column.clone()));
        }
    }

    if let Some(limit) = req.limit {
        if limit == 0 {
            return Err(SqlError::InvalidLimit(limit));
        }
    }

    let mut sql = format!(
        "SELECT {} FROM {}.{}",
        columns.join(", "),
        config.schema,
        config.table
    );

    let mut where_clauses: Vec<String> = Vec::new();
    let mut parameters: BTreeMap<String, SqlValue> = BTreeMap::new();

    // Recognized filter keys only; anything else is ignored by policy
    let start_dt = req.filters.get("start_dt");
    let end_dt = req.filters.get("end_dt");
    if let (Some(start), Some(end)) = (start_dt, end_dt) {
        where_clauses.push(format!(
            "{} >= :start_dt AND {} < :end_dt",
            config.time_column, config.time_column
        ));
        parameters.insert("start_dt".to_string(), start.clone());
        parameters.insert("end_dt".to_string(), end.clone());
    } else if let Some(date) = req.filters.get("date") {
        where_clauses.push(format!("CAST({} AS date) = :date", config.time_column));
        parameters.insert("date".to_string(), date.clone());
    }

    if !where_clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_clauses.join(" AND "));
    }

    if let Some(order) = req.order.as_deref() {
        sql.push_str(&format!(" ORDER BY {}", order));
    }

    if let Some(limit) = req.limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    }

    tracing::debug!(%sql, params = parameters.len(), "rendered template SQL");
    Ok(SqlResponse { sql, parameters })
}

fn parse_date_hint(value: &str) -> SqlResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| SqlError::InvalidDateHint(value.to_string()))
}

fn parse_time_hint(value: &str) -> SqlResult<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|_| SqlError::InvalidTimeHint(value.to_string()))
}
