//! Callboard REST API
//!
//! HTTP API layer for callboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Reports
//! - `POST /report` - Run the full report pipeline
//! - `POST /extract` - Extract structured requirements
//!
//! ## SQL engine
//! - `POST /mcp/sql/generate` - Render SQL from a structured intent
//! - `POST /mcp/sql/render` - Render SQL from a template request
//! - `POST /mcp/sql/query` - Bind and execute a rendered statement
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        // Report routes
        .route("/report", post(routes::report::create_report))
        .route("/extract", post(routes::report::extract_only))
        // SQL engine routes
        .route("/mcp/sql/generate", post(routes::sql::generate_sql))
        .route("/mcp/sql/render", post(routes::sql::render_template))
        .route("/mcp/sql/query", post(routes::sql::run_query))
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Callboard API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Callboard API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        build_router(AppState::new(Config::default()))
    }

    fn create_test_app_with_db() -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calls.db");
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE calls (event_time TEXT NOT NULL, hold_time_seconds INTEGER);
             INSERT INTO calls VALUES ('2024-01-01 14:05:00', 42);
             INSERT INTO calls VALUES ('2024-01-01 14:20:00', 7);",
        )
        .unwrap();
        drop(conn);

        let mut config = Config::default();
        config.database.connection_string = path.to_string_lossy().into_owned();
        (build_router(AppState::new(config)), dir)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full_reports_disabled_database() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "disabled");
        assert_eq!(body["backend_mode"], "local");
    }

    #[tokio::test]
    async fn test_extract_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(post_json(
                "/extract",
                r#"{"raw_text": "show lowest hold time at 2pm"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["direction"], "low");
        assert_eq!(body["time_hint"], "14:00:00");
        assert_eq!(body["date_hint"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_generate_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(post_json(
                "/mcp/sql/generate",
                r#"{"requirements": {"metric": "hold", "direction": "low",
                    "time_hint": "14:00:00", "date_hint": "2024-01-01",
                    "original_text": "lowest at 2pm"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body["sql"],
            "SELECT event_time, hold_time_seconds FROM dbo.calls \
             WHERE event_time >= :start_dt AND event_time < :end_dt \
             ORDER BY hold_time_seconds ASC"
        );
        assert_eq!(body["parameters"]["start_dt"], "2024-01-01 14:00:00");
        assert_eq!(body["parameters"]["end_dt"], "2024-01-01 15:00:00");
    }

    #[tokio::test]
    async fn test_generate_endpoint_rejects_bad_hint() {
        let app = create_test_app();

        let response = app
            .oneshot(post_json(
                "/mcp/sql/generate",
                r#"{"requirements": {"metric": "hold", "date_hint": "garbage",
                    "original_text": "x"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_render_endpoint_rejects_unlisted_column() {
        let app = create_test_app();

        let response = app
            .oneshot(post_json(
                "/mcp/sql/render",
                r#"{"columns": ["agent_name"], "filters": {}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Column not allowed: agent_name");
    }

    #[tokio::test]
    async fn test_query_endpoint_missing_parameter() {
        let (app, _dir) = create_test_app_with_db();

        let response = app
            .oneshot(post_json(
                "/mcp/sql/query",
                r#"{"sql": "SELECT * FROM calls WHERE event_time >= :start_dt",
                    "parameters": {}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Missing parameter: start_dt");
    }

    #[tokio::test]
    async fn test_query_endpoint_without_database_returns_no_rows() {
        let app = create_test_app();

        let response = app
            .oneshot(post_json(
                "/mcp/sql/query",
                r#"{"sql": "SELECT 1", "parameters": {}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["rows"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_query_endpoint_returns_rows_in_order() {
        let (app, _dir) = create_test_app_with_db();

        let response = app
            .oneshot(post_json(
                "/mcp/sql/query",
                r#"{"sql": "SELECT event_time, hold_time_seconds FROM calls ORDER BY hold_time_seconds ASC",
                    "parameters": {}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["rows"][0]["hold_time_seconds"], 7);
        assert_eq!(body["rows"][1]["hold_time_seconds"], 42);
    }

    #[tokio::test]
    async fn test_report_endpoint_without_database() {
        let app = create_test_app();

        let response = app
            .oneshot(post_json(
                "/report",
                r#"{"raw_text": "lowest hold time at 2pm"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["requirements"]["direction"], "low");
        assert_eq!(body["data"], serde_json::json!([]));
        assert_eq!(
            body["warnings"][0],
            "No data returned. Check DB connection string and schema mapping."
        );
        assert_eq!(body["report"]["count"], 0);
    }

    #[tokio::test]
    async fn test_report_endpoint_sql_only() {
        let app = create_test_app();

        let response = app
            .oneshot(post_json(
                "/report",
                r#"{"raw_text": "hold time at 2pm", "output_sql_only": true}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let sql = body["sql"].as_str().unwrap();
        assert!(sql.contains("'14:00:00'"));
        assert!(!sql.contains(":start_time"));
        assert!(body.get("report").is_none());
        assert_eq!(body["warnings"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_report_endpoint_invalid_json() {
        let app = create_test_app();

        let response = app
            .oneshot(post_json("/report", "not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
