//! In-process backend
//!
//! Calls the renderer and executor directly against the process-local
//! configuration snapshot.

use async_trait::async_trait;

use crate::backend::{BackendResult, SqlBackend};
use crate::config::Config;
use crate::sql;
use crate::sql::{QueryResponse, SqlRequest, SqlResponse, TemplateRequest};

/// Backend that renders and executes in-process
pub struct LocalBackend {
    config: Config,
}

impl LocalBackend {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SqlBackend for LocalBackend {
    async fn generate_sql(&self, request: &SqlRequest) -> BackendResult<SqlResponse> {
        Ok(sql::render_intent(&request.requirements, &self.config.report)?)
    }

    async fn render_template(&self, request: &TemplateRequest) -> BackendResult<SqlResponse> {
        Ok(sql::render_template(request, &self.config.report)?)
    }

    async fn run_query(&self, response: &SqlResponse) -> BackendResult<QueryResponse> {
        Ok(sql::run_query(
            response,
            &self.config.database.connection_string,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Requirements;

    fn requirements() -> Requirements {
        Requirements {
            metric: "hold".to_string(),
            direction: None,
            time_hint: Some("14:00:00".to_string()),
            date_hint: Some("2024-01-01".to_string()),
            original_text: "2pm".to_string(),
        }
    }

    #[tokio::test]
    async fn test_generate_matches_direct_render() {
        let config = Config::default();
        let backend = LocalBackend::new(config.clone());

        let via_backend = backend
            .generate_sql(&SqlRequest {
                requirements: requirements(),
            })
            .await
            .unwrap();
        let direct = sql::render_intent(&requirements(), &config.report).unwrap();

        assert_eq!(via_backend, direct);
    }

    #[tokio::test]
    async fn test_query_without_database_returns_empty() {
        let backend = LocalBackend::new(Config::default());
        let rendered = backend
            .generate_sql(&SqlRequest {
                requirements: requirements(),
            })
            .await
            .unwrap();

        let result = backend.run_query(&rendered).await.unwrap();
        assert!(result.rows.is_empty());
    }
}
