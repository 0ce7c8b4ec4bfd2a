//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::backend::{self, SqlBackend};
use crate::config::Config;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Immutable configuration snapshot
    pub config: Arc<Config>,
    /// Backend selected at startup from the configured mode
    pub backend: Arc<dyn SqlBackend>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create state with the backend the configuration selects
    pub fn new(config: Config) -> Self {
        let backend = backend::from_config(&config);
        Self {
            config: Arc::new(config),
            backend,
            start_time: Instant::now(),
        }
    }

    /// Create state with an explicit backend
    pub fn with_backend(config: Config, backend: Arc<dyn SqlBackend>) -> Self {
        Self {
            config: Arc::new(config),
            backend,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
