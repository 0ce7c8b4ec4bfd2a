//! Data Transfer Objects
//!
//! Request and response types for the API endpoints. The SQL engine
//! wire types (`SqlRequest`, `TemplateRequest`, `SqlResponse`,
//! `QueryResponse`) double as their own DTOs and live in
//! [`crate::sql::types`]; the shapes here are the report surface and
//! health endpoints.

use serde::{Deserialize, Serialize};

/// Report request
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRequest {
    /// Raw user text input
    pub raw_text: String,
    /// Return only the generated SQL, with parameters inlined
    #[serde(default)]
    pub output_sql_only: bool,
}

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy or degraded
    pub status: String,
    /// Database status: ok, disabled, or error
    pub database: String,
    /// Configured backend mode
    pub backend_mode: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
