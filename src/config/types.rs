// Typed configuration tree
// One section per concern; every key has a default in `Config::load_from`

use serde::Deserialize;
use std::collections::HashMap;

/// Root of the deserialized configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

/// Listening socket and runtime sizing
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Listen backlog passed to `listen(2)`
    pub backlog: i32,
}

/// Media storage configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding uploaded media; fixed for the life of the process
    pub root: String,
    /// URL prefix the storage tree is mounted under, e.g. `/api/uploads`
    pub mount_prefix: String,
    /// Read size for streamed body chunks
    pub chunk_size: usize,
    pub cache_control: String,
    /// Extra or replacement extension -> MIME entries
    #[serde(default)]
    pub mime_overrides: HashMap<String, String>,
}

/// Log level, access log format and targets
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// `combined`, `common`, `json`, or a `$variable` pattern
    pub access_log_format: String,
    /// Access and info lines go here; stdout when unset
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Warnings and errors go here; stderr when unset
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Connection handling limits and timeouts
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// HTTP/1.1 keep-alive; 0 disables it
    pub keep_alive_timeout: u64,
    /// Seconds allowed for a client to send request headers
    pub header_read_timeout: u64,
    pub max_connections: Option<u64>,
    /// Seconds to wait for in-flight transfers on shutdown
    pub shutdown_grace_period: u64,
}

/// Response decoration and auxiliary endpoints
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    /// Path answered with `{"status":"ok"}`
    pub health_path: String,
}
