//! SQL Engine
//!
//! The requirements-to-SQL rendering engine and its safe execution
//! path. Rendering turns a structured intent or template request into a
//! statement with named `:identifier` placeholders plus a parameter
//! map; binding rewrites those into driver-positional markers; the
//! executor runs the result over a scoped connection.
//!
//! Identifier safety: column and table names come only from
//! configuration. User-influenced values are always bound parameters.

pub mod bind;
pub mod error;
pub mod exec;
pub mod render;
pub mod types;
pub mod value;

pub use bind::{bind, inline_literals};
pub use error::{SqlError, SqlResult};
pub use exec::run_query;
pub use render::{render_intent, render_template};
pub use types::{QueryResponse, SqlRequest, SqlResponse, TemplateRequest};
pub use value::{Row, SqlValue};
