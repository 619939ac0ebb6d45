// Configuration module entry point
// Loads layered configuration and builds the immutable application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, StorageConfig,
};

/// Config file used when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (extension optional)
    ///
    /// Sources, lowest priority first: built-in defaults, the file, then
    /// `MEDIA_`-prefixed environment variables (`MEDIA_SERVER__PORT=9000`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.backlog", 1024)?
            .set_default("storage.root", "public/uploads")?
            .set_default("storage.mount_prefix", "/api/uploads")?
            .set_default("storage.chunk_size", 65_536)?
            .set_default(
                "storage.cache_control",
                "public, max-age=31536000, immutable",
            )?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.header_read_timeout", 30)?
            .set_default("performance.shutdown_grace_period", 10)?
            .set_default("http.server_name", "media-streamer")?
            .set_default("http.enable_cors", false)?
            .set_default("http.health_path", "/healthz")?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("MEDIA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate().map_err(config::ConfigError::Message)?;
        Ok(cfg)
    }

    /// Reject values that would make the server misbehave rather than fail fast
    pub fn validate(&self) -> Result<(), String> {
        if !self.storage.mount_prefix.starts_with('/') {
            return Err(format!(
                "storage.mount_prefix must start with '/': '{}'",
                self.storage.mount_prefix
            ));
        }
        if self.storage.chunk_size == 0 {
            return Err("storage.chunk_size must be greater than 0".to_string());
        }
        if self.storage.root.trim().is_empty() {
            return Err("storage.root must not be empty".to_string());
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
