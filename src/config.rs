//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration
///
/// An empty connection string puts the executor in no-op mode: queries
/// succeed with zero rows and no connection is ever opened. Useful for
/// offline and demo setups.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub connection_string: String,
}

/// Report rendering configuration
///
/// Names the schema, table, and columns the renderer is allowed to
/// reference. These are the only identifiers that ever reach SQL text.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_schema")]
    pub schema: String,

    #[serde(default = "default_table")]
    pub table: String,

    #[serde(default = "default_time_column")]
    pub time_column: String,

    #[serde(default = "default_metric_column")]
    pub metric_column: String,

    /// Width of the half-open time window derived from a single
    /// time or date+time hint, in minutes. Must be positive.
    #[serde(default = "default_window_minutes")]
    pub window_minutes: u32,
}

fn default_schema() -> String {
    "dbo".to_string()
}

fn default_table() -> String {
    "calls".to_string()
}

fn default_time_column() -> String {
    "event_time".to_string()
}

fn default_metric_column() -> String {
    "hold_time_seconds".to_string()
}

fn default_window_minutes() -> u32 {
    60
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            table: default_table(),
            time_column: default_time_column(),
            metric_column: default_metric_column(),
            window_minutes: default_window_minutes(),
        }
    }
}

/// Which backend serves SQL generation and query execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Render and execute in-process
    Local,
    /// Proxy to a remote callboard instance over HTTP
    Http,
}

impl Default for BackendMode {
    fn default() -> Self {
        BackendMode::Local
    }
}

/// Backend selection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub mode: BackendMode,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8082".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::default(),
            base_url: default_base_url(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("callboard").join("config.toml")),
            Some(PathBuf::from("/etc/callboard/config.toml")),
            Some(PathBuf::from("./callboard.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Server overrides
        if let Ok(host) = std::env::var("CALLBOARD_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("CALLBOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Database overrides
        if let Ok(conn) = std::env::var("CALLBOARD_DB") {
            self.database.connection_string = conn;
        }

        // Report overrides
        if let Ok(schema) = std::env::var("CALLBOARD_SCHEMA") {
            self.report.schema = schema;
        }
        if let Ok(table) = std::env::var("CALLBOARD_TABLE") {
            self.report.table = table;
        }
        if let Ok(col) = std::env::var("CALLBOARD_TIME_COLUMN") {
            self.report.time_column = col;
        }
        if let Ok(col) = std::env::var("CALLBOARD_METRIC_COLUMN") {
            self.report.metric_column = col;
        }
        if let Ok(minutes) = std::env::var("CALLBOARD_WINDOW_MINUTES") {
            // A non-positive window is meaningless; ignore it
            if let Some(m) = minutes.parse().ok().filter(|m: &u32| *m > 0) {
                self.report.window_minutes = m;
            }
        }

        // Backend overrides
        if let Ok(mode) = std::env::var("CALLBOARD_BACKEND_MODE") {
            match mode.to_lowercase().as_str() {
                "local" => self.backend.mode = BackendMode::Local,
                "http" => self.backend.mode = BackendMode::Http,
                other => tracing::warn!("Unknown backend mode {:?}, keeping current", other),
            }
        }
        if let Ok(url) = std::env::var("CALLBOARD_BACKEND_URL") {
            self.backend.base_url = url;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("CALLBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CALLBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.report.window_minutes == 0 {
            return Err(ConfigError::Invalid(
                "report.window_minutes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            report: ReportConfig::default(),
            backend: BackendConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Callboard Configuration
#
# Environment variables override these settings:
# - CALLBOARD_HOST / CALLBOARD_PORT
# - CALLBOARD_DB
# - CALLBOARD_SCHEMA / CALLBOARD_TABLE
# - CALLBOARD_TIME_COLUMN / CALLBOARD_METRIC_COLUMN
# - CALLBOARD_WINDOW_MINUTES
# - CALLBOARD_BACKEND_MODE / CALLBOARD_BACKEND_URL
# - CALLBOARD_LOG_LEVEL / CALLBOARD_LOG_FORMAT

[server]
# API server host
host = "0.0.0.0"

# API server port
port = 8082

[database]
# SQLite database path. Leave empty to run in no-op mode
# (queries return zero rows, nothing is opened).
connection_string = ""

[report]
# Schema and table the renderer targets
schema = "dbo"
table = "calls"

# Columns the renderer may reference
time_column = "event_time"
metric_column = "hold_time_seconds"

# Width of the time window derived from a single hint (minutes)
window_minutes = 60

[backend]
# "local" renders and executes in-process.
# "http" proxies to a remote callboard instance.
mode = "local"

# Remote instance URL, used when mode = "http"
base_url = "http://localhost:8082"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
