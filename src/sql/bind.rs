//! Parameter Binder
//!
//! Rewrites named `:identifier` placeholders in a rendered statement
//! into the driver's positional `?` markers, collecting values in the
//! order the placeholders occur in the text.

use regex::Regex;
use std::sync::OnceLock;

use crate::sql::error::{SqlError, SqlResult};
use crate::sql::types::SqlResponse;
use crate::sql::value::SqlValue;

fn placeholder_pattern() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_RE
        .get_or_init(|| Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("valid placeholder pattern"))
}

/// Rewrite named placeholders into positional markers.
///
/// Returns the rewritten statement and the values to bind, one per
/// placeholder occurrence: a repeated placeholder binds the same value
/// once per occurrence. Fails fast with the first unresolvable name;
/// nothing is emitted on failure. Extra parameter keys the statement
/// never references are tolerated. A statement without placeholders is
/// returned unchanged with an empty value list.
pub fn bind(response: &SqlResponse) -> SqlResult<(String, Vec<SqlValue>)> {
    let pattern = placeholder_pattern();

    let mut values = Vec::new();
    for caps in pattern.captures_iter(&response.sql) {
        let name = &caps[1];
        match response.parameters.get(name) {
            Some(value) => values.push(value.clone()),
            None => return Err(SqlError::MissingParameter(name.to_string())),
        }
    }

    let rewritten = pattern.replace_all(&response.sql, "?").into_owned();
    Ok((rewritten, values))
}

/// Inline parameter values as SQL literals for a human-facing preview.
///
/// Placeholders without a matching parameter are left untouched. The
/// result is for display only and must never be executed.
pub fn inline_literals(response: &SqlResponse) -> String {
    placeholder_pattern()
        .replace_all(&response.sql, |caps: &regex::Captures| {
            match response.parameters.get(&caps[1]) {
                Some(value) => value.to_sql_literal(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
