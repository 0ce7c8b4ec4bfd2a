//! Remote HTTP backend
//!
//! Proxies backend calls to a remote callboard instance over the same
//! wire shapes the local path uses. A non-success status from the
//! remote surfaces as a transport-layer error; nothing is retried.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use async_trait::async_trait;

use crate::backend::{BackendError, BackendResult, SqlBackend};
use crate::sql::{QueryResponse, SqlRequest, SqlResponse, TemplateRequest};

/// Backend that forwards to a remote instance over HTTP POST
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> BackendResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "forwarding to remote backend");

        let response = self.client.post(&url).json(body).send().await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            Err(BackendError::Remote {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl SqlBackend for HttpBackend {
    async fn generate_sql(&self, request: &SqlRequest) -> BackendResult<SqlResponse> {
        self.post_json("/mcp/sql/generate", request).await
    }

    async fn render_template(&self, request: &TemplateRequest) -> BackendResult<SqlResponse> {
        self.post_json("/mcp/sql/render", request).await
    }

    async fn run_query(&self, response: &SqlResponse) -> BackendResult<QueryResponse> {
        self.post_json("/mcp/sql/query", response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let backend = HttpBackend::new("http://localhost:8082/");
        assert_eq!(backend.base_url, "http://localhost:8082");
    }
}
