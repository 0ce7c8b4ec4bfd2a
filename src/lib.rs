//! # Callboard
//!
//! Operational text-to-SQL reporting. Callboard turns free-text
//! operational queries ("lowest hold time today at 2pm") into
//! parameterized SQL, executes them against a relational store, and
//! summarizes the result.
//!
//! ## Modules
//!
//! - [`intent`]: Requirements extraction from raw text
//! - [`sql`]: The rendering engine, parameter binder, and executor
//! - [`backend`]: Local and remote-proxy backends behind one interface
//! - [`report`]: Result summarization
//! - [`workflow`]: The end-to-end report pipeline
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use callboard::backend::LocalBackend;
//! use callboard::config::Config;
//! use callboard::workflow::run_report_pipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let backend = LocalBackend::new(config.clone());
//!
//!     let report =
//!         run_report_pipeline("lowest hold time today at 2pm", false, &config, &backend).await?;
//!
//!     println!("{} rows, {:?}", report.data.len(), report.report);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod intent;
pub mod report;
pub mod sql;
pub mod workflow;

// Re-export top-level types for convenience
pub use config::{BackendMode, Config, ConfigError};

pub use intent::{extract_requirements, Direction, Requirements};

pub use sql::{
    bind, inline_literals, render_intent, render_template, run_query, QueryResponse, Row,
    SqlError, SqlRequest, SqlResponse, SqlResult, SqlValue, TemplateRequest,
};

pub use backend::{BackendError, BackendResult, HttpBackend, LocalBackend, SqlBackend};

pub use report::{summarize, Summary};

pub use workflow::{run_report_pipeline, Report};

pub use api::{build_router, serve, ApiError, ApiResult, AppState};
