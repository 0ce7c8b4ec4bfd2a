//! SQL Backends
//!
//! Capability interface in front of the renderer and executor, selected
//! once at startup. [`LocalBackend`] runs everything in-process;
//! [`HttpBackend`] proxies the same request and response shapes to a
//! remote callboard instance. The two modes are behaviorally identical
//! for identical inputs; transport is the only difference.

pub mod http;
pub mod local;

pub use http::HttpBackend;
pub use local::LocalBackend;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{BackendMode, Config};
use crate::sql::{QueryResponse, SqlError, SqlRequest, SqlResponse, TemplateRequest};

/// Errors from a backend call
#[derive(Error, Debug)]
pub enum BackendError {
    /// Rendering, binding, or execution failed
    #[error(transparent)]
    Sql(#[from] SqlError),

    /// Network fault talking to the remote instance
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Remote instance answered with a non-success status
    #[error("Remote error {status}: {message}")]
    Remote { status: u16, message: String },
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// The rendering and execution capabilities the pipeline depends on
#[async_trait]
pub trait SqlBackend: Send + Sync {
    /// Render SQL for a structured intent
    async fn generate_sql(&self, request: &SqlRequest) -> BackendResult<SqlResponse>;

    /// Render SQL for an explicit template request
    async fn render_template(&self, request: &TemplateRequest) -> BackendResult<SqlResponse>;

    /// Bind and execute a rendered statement
    async fn run_query(&self, response: &SqlResponse) -> BackendResult<QueryResponse>;
}

/// Build the backend the configuration selects
pub fn from_config(config: &Config) -> Arc<dyn SqlBackend> {
    match config.backend.mode {
        BackendMode::Local => Arc::new(LocalBackend::new(config.clone())),
        BackendMode::Http => Arc::new(HttpBackend::new(config.backend.base_url.clone())),
    }
}
