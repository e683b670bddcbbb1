// Configuration module entry point
// Loads the server configuration and holds the per-process serving state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, ServerConfig};
pub use types::{
    DEFAULT_ACCESS_LOG_FORMAT, DEFAULT_HOST, DEFAULT_INDEX_FILES, DEFAULT_MARKER_FILE,
    DEFAULT_PORT, DEFAULT_QUIET_EXTENSIONS, DEFAULT_ROOT, DEFAULT_SHUTDOWN_GRACE_MS,
};

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "devserver";

/// Prefix for environment overrides, e.g. `DEVSERVER_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "DEVSERVER";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional; with no file and no `DEVSERVER_*` variables the
    /// result equals `Config::default()`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.root", DEFAULT_ROOT)?
            .set_default("server.marker_file", DEFAULT_MARKER_FILE)?
            .set_default("server.open_browser", true)?
            .set_default("server.index_files", DEFAULT_INDEX_FILES.to_vec())?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", DEFAULT_ACCESS_LOG_FORMAT)?
            .set_default("logging.quiet_extensions", DEFAULT_QUIET_EXTENSIONS.to_vec())?
            .set_default("performance.keep_alive", true)?
            .set_default(
                "performance.shutdown_grace_ms",
                i64::from(DEFAULT_SHUTDOWN_GRACE_MS),
            )?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| ServerError::InvalidAddress(format!("{}:{} ({e})", self.server.host, self.server.port)))
    }
}
